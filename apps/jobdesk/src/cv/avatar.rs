use anyhow::{Context, Result};
use reqwest::Url;

use crate::cv::template::Rgb8;

pub const DEFAULT_AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

/// Builds placeholder-avatar image URLs. The image is referenced, never fetched.
#[derive(Debug, Clone)]
pub struct AvatarService {
    base: Url,
}

impl AvatarService {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("AVATAR_BASE_URL '{base_url}' is not a valid URL"))?;
        Ok(Self { base })
    }

    /// `<base>?name=<name>&background=<hex>&color=fff&size=128`
    pub fn url_for(&self, name: &str, background: Rgb8) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("background", &background.hex())
            .append_pair("color", "fff")
            .append_pair("size", "128");
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_name_and_color() {
        let avatars = AvatarService::new(DEFAULT_AVATAR_BASE_URL).unwrap();
        let url = avatars.url_for("Ayşe Yılmaz", Rgb8(37, 99, 235));
        assert!(url.starts_with("https://ui-avatars.com/api/?name="));
        assert!(url.contains("background=2563eb"));
        assert!(url.contains("Ay%C5%9Fe+Y%C4%B1lmaz"), "got {url}");
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        assert!(AvatarService::new("not a url").is_err());
    }
}
