use tracing::info;
use url::Url;

use super::error::ProfileError;
use crate::store::{AppState, MediaRef, Platform, SocialLink, state::next_id};

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
            Platform::Snapchat => "Snapchat",
            Platform::Website => "Website",
            Platform::Other => "Link",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Platform::Instagram => "◎",
            Platform::Twitter => "✦",
            Platform::Youtube => "▶",
            Platform::Tiktok => "♪",
            Platform::Snapchat => "◆",
            Platform::Website => "◍",
            Platform::Other => "↗",
        }
    }

    /// Brand color, `None` for the generic platforms that follow the theme.
    pub fn brand_color(self) -> Option<u32> {
        match self {
            Platform::Instagram => Some(0x00e4405f),
            Platform::Twitter => Some(0x001da1f2),
            Platform::Youtube => Some(0x00ff0000),
            Platform::Tiktok => Some(0x0025f4ee),
            Platform::Snapchat => Some(0x00fffc00),
            Platform::Website | Platform::Other => None,
        }
    }

    pub fn cycle(self, forward: bool) -> Self {
        let all = Platform::ALL;
        let pos = all.iter().position(|p| *p == self).unwrap_or_default();
        let next = if forward {
            (pos + 1) % all.len()
        } else {
            (pos + all.len() - 1) % all.len()
        };
        all[next]
    }
}

/// Accepts only absolute http(s) URLs.
pub fn validate_url(raw: &str) -> Result<Url, ProfileError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ProfileError::EmptyUrl);
    }
    let url = Url::parse(raw).map_err(|e| ProfileError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ProfileError::UnsupportedScheme),
    }
}

pub fn add_social_link(
    state: &mut AppState,
    platform: Platform,
    url: &str,
) -> Result<u64, ProfileError> {
    validate_url(url)?;

    let id = next_id(state.profile.social_links.iter().map(|l| l.id));
    state.profile.social_links.push(SocialLink {
        id,
        platform,
        url: url.trim().to_string(),
    });
    info!(id, platform = platform.label(), "social_link_added");
    Ok(id)
}

/// Removes the link at `index`. Callers ask for confirmation first.
pub fn delete_social_link(state: &mut AppState, index: usize) -> Option<SocialLink> {
    if index >= state.profile.social_links.len() {
        return None;
    }
    let link = state.profile.social_links.remove(index);
    info!(id = link.id, "social_link_deleted");
    Some(link)
}

pub fn open_social_link(state: &AppState, index: usize) -> Result<(), ProfileError> {
    let link = state
        .profile
        .social_links
        .get(index)
        .ok_or(ProfileError::NoSuchLink(index))?;
    open::that_detached(&link.url).map_err(ProfileError::Open)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialRow<'a> {
    pub icon: &'static str,
    pub name: &'static str,
    pub color: Option<u32>,
    pub url: &'a str,
}

pub fn social_rows(state: &AppState) -> impl Iterator<Item = SocialRow<'_>> {
    state.profile.social_links.iter().map(|link| SocialRow {
        icon: link.platform.icon(),
        name: link.platform.label(),
        color: link.platform.brand_color(),
        url: &link.url,
    })
}

/// Blank values keep the current name or bio.
pub fn update_profile(state: &mut AppState, name: &str, bio: &str) -> bool {
    let mut changed = false;
    let (name, bio) = (name.trim(), bio.trim());
    if !name.is_empty() && name != state.profile.name {
        state.profile.name = name.to_string();
        changed = true;
    }
    if !bio.is_empty() && bio != state.profile.bio {
        state.profile.bio = bio.to_string();
        changed = true;
    }
    changed
}

pub fn set_avatar(state: &mut AppState, avatar: MediaRef) -> Result<(), ProfileError> {
    if !avatar.mime().starts_with("image/") {
        return Err(ProfileError::NotAnImage(avatar.mime().to_string()));
    }
    state.profile.avatar = avatar;
    info!("avatar_updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_links_without_mutation() {
        let mut state = AppState::default();

        for bad in ["", "   ", "example.com", "ftp://example.com", "javascript:alert(1)"] {
            assert!(add_social_link(&mut state, Platform::Website, bad).is_err(), "{bad}");
        }
        assert!(state.profile.social_links.is_empty());
    }

    #[test]
    fn accepts_https_link_once_with_fresh_id() {
        let mut state = AppState::default();
        let first = add_social_link(&mut state, Platform::Other, "http://a.example").unwrap();
        let second =
            add_social_link(&mut state, Platform::Website, "https://example.com").unwrap();

        assert_ne!(first, second);
        let matching: Vec<_> = state
            .profile
            .social_links
            .iter()
            .filter(|l| l.url == "https://example.com")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, second);
    }

    #[test]
    fn delete_out_of_range_is_a_no_op() {
        let mut state = AppState::default();
        add_social_link(&mut state, Platform::Twitter, "https://x.com/w").unwrap();

        assert!(delete_social_link(&mut state, 3).is_none());
        assert_eq!(state.profile.social_links.len(), 1);
        assert!(delete_social_link(&mut state, 0).is_some());
        assert!(state.profile.social_links.is_empty());
    }

    #[test]
    fn rows_follow_list_order() {
        let mut state = AppState::default();
        assert_eq!(social_rows(&state).count(), 0);

        add_social_link(&mut state, Platform::Instagram, "https://instagram.com/w").unwrap();
        add_social_link(&mut state, Platform::Youtube, "https://youtube.com/@w").unwrap();

        let names: Vec<_> = social_rows(&state).map(|r| r.name).collect();
        assert_eq!(names, ["Instagram", "YouTube"]);
    }

    #[test]
    fn blank_profile_fields_are_kept() {
        let mut state = AppState::default();
        assert!(update_profile(&mut state, "Nour", "  "));
        assert_eq!(state.profile.name, "Nour");
        assert_eq!(state.profile.bio, AppState::default().profile.bio);
        assert!(!update_profile(&mut state, "", ""));
    }

    #[test]
    fn avatar_must_be_an_image() {
        let mut state = AppState::default();
        let before = state.profile.avatar.clone();

        let err = set_avatar(&mut state, MediaRef::embed("audio/mpeg", b"x")).unwrap_err();
        assert!(matches!(err, ProfileError::NotAnImage(_)));
        assert_eq!(state.profile.avatar, before);

        set_avatar(&mut state, MediaRef::embed("image/png", b"x")).unwrap();
        assert!(state.profile.avatar.is_embedded());
    }

    #[test]
    fn platforms_cycle_both_ways() {
        assert_eq!(Platform::Instagram.cycle(false), Platform::Other);
        assert_eq!(Platform::Other.cycle(true), Platform::Instagram);
        assert_eq!(Platform::Twitter.cycle(true).cycle(false), Platform::Twitter);
    }
}
