//! Object key and object URL generation
//!
//! Pure functions: the only outside input is the wall clock, read once per
//! call when hashed naming is requested. Keys never start with `/` and
//! never contain a doubled `/`, whatever the prefix combination.

use std::path::Path;

use crate::profile::Profile;
use crate::upload::UploadOptions;

/// Compute the destination object key for a local file.
///
/// An explicit `options.object_key` is returned verbatim (single-file
/// uploads only). Otherwise the key is the non-empty segments of
/// `profile.prefix`, `options.key_prefix` and `relative_dir` joined with
/// `/`, followed by the filename component: either the original basename,
/// or (with hashed naming) the MD5 of `basename + current millis` with
/// the original extension preserved.
pub fn generate_object_key(
    path: &Path,
    profile: &Profile,
    options: &UploadOptions,
    relative_dir: &str,
) -> String {
    if let Some(key) = &options.object_key {
        return key.clone();
    }

    let mut segments: Vec<String> = Vec::new();
    for segment in [
        profile.prefix.as_str(),
        options.key_prefix.as_deref().unwrap_or(""),
        relative_dir,
    ] {
        let segment = segment.trim_matches('/');
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
    }

    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if options.hashed_name {
        segments.push(hashed_name(&basename));
    } else {
        segments.push(basename);
    }

    segments.join("/")
}

/// Hash of `basename + current millis`, keeping the original extension.
///
/// Deliberately content-independent, matching the historical naming
/// scheme: two files with the same basename uploaded in the same
/// millisecond collide, which is accepted.
fn hashed_name(basename: &str) -> String {
    let millis = jiff::Timestamp::now().as_millisecond();
    let mut context = md5::Context::new();
    context.consume(format!("{basename}{millis}"));
    let digest = format!("{:x}", context.finalize());

    match Path::new(basename).extension() {
        Some(ext) => format!("{digest}.{}", ext.to_string_lossy()),
        None => digest,
    }
}

/// Build the public URL of an object.
///
/// A configured host wins; otherwise the bucket name is injected into the
/// endpoint right after the URL scheme (virtual-hosted style).
pub fn object_url(profile: &Profile, key: &str) -> String {
    if !profile.host.is_empty() {
        return format!("{}/{key}", profile.host.trim_end_matches('/'));
    }

    let endpoint = profile.endpoint.trim_end_matches('/');
    let host = if let Some(rest) = endpoint.strip_prefix("https://") {
        format!("https://{}.{rest}", profile.bucket)
    } else if let Some(rest) = endpoint.strip_prefix("http://") {
        format!("http://{}.{rest}", profile.bucket)
    } else {
        endpoint.to_string()
    };

    format!("{host}/{key}")
}
