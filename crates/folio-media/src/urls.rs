//! Public and CDN-optimized media URLs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Widths offered in a responsive `srcset`.
pub const SRCSET_WIDTHS: [u32; 6] = [640, 750, 828, 1080, 1200, 1920];

/// Query-value escaping: everything but unreserved characters.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Transformations requested from an image CDN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    /// Output format, e.g. `webp` or `avif`.
    pub format: Option<String>,
    /// Resize mode, e.g. `cover` or `contain`.
    pub fit: Option<String>,
}

impl ImageOptions {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    fn query(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(w) = self.width {
            params.push(("w", w.to_string()));
        }
        if let Some(h) = self.height {
            params.push(("h", h.to_string()));
        }
        if let Some(q) = self.quality {
            params.push(("q", q.to_string()));
        }
        if let Some(f) = &self.format {
            params.push(("f", f.clone()));
        }
        if let Some(fit) = &self.fit {
            params.push(("fit", fit.clone()));
        }
        params
            .iter()
            .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Builds URLs for assets under the bucket's `public/` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base_url: String,
    cdn_optimize: bool,
}

impl MediaUrls {
    /// A trailing `/` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>, cdn_optimize: bool) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            cdn_optimize,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cdn_optimize(&self) -> bool {
        self.cdn_optimize
    }

    /// `{base}/public/{path}` for a path relative to `public/`.
    pub fn public_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/public/{path}", self.base_url)
    }

    /// Public URL with CDN transform parameters.
    ///
    /// Parameters are only appended when CDN optimization is enabled;
    /// otherwise this is the plain public URL.
    pub fn optimized_url(&self, path: &str, options: &ImageOptions) -> String {
        let url = self.public_url(path);
        if !self.cdn_optimize {
            return url;
        }
        let query = options.query();
        if query.is_empty() {
            url
        } else {
            format!("{url}?{query}")
        }
    }

    /// `srcset` attribute value over [`SRCSET_WIDTHS`].
    pub fn srcset(&self, path: &str) -> String {
        self.srcset_with(path, &SRCSET_WIDTHS)
    }

    pub fn srcset_with(&self, path: &str, widths: &[u32]) -> String {
        widths
            .iter()
            .map(|&w| format!("{} {w}w", self.optimized_url(path, &ImageOptions::width(w))))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
