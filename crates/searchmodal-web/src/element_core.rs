#![forbid(unsafe_code)]

//! Platform-neutral description of the element's shadow tree.
//!
//! ```text
//! <button aria-label=.. title=..>        trigger
//!   <lazy-svg loading="eager" href=..>   icon
//! </button>
//! <dialog>                               backdrop surface, emits "close"
//!   <div id="content">                   content wrapper
//!     <litdev-search>                    emits "close"
//! ```
//!
//! The wasm module builds exactly this tree and wires one listener per
//! [`Part`]. Keeping the description here lets native tests check it.

use searchmodal_core::ClickRegion;
use searchmodal_widgets::SearchModalConfig;

use crate::error::MountError;

pub(crate) const TRIGGER_TAG: &str = "button";
pub(crate) const ICON_TAG: &str = "lazy-svg";
pub(crate) const DIALOG_TAG: &str = "dialog";
pub(crate) const CONTENT_TAG: &str = "div";
pub(crate) const CONTENT_ID: &str = "content";
pub(crate) const SEARCH_TAG: &str = "litdev-search";
pub(crate) const OVERFLOW_PROPERTY: &str = "overflow";
pub(crate) const ICON_SOURCE_ATTRIBUTE: &str = "href";

/// Parse the optional JSON passed to `mount`. Blank means defaults.
pub(crate) fn parse_config(json: Option<&str>) -> Result<SearchModalConfig, MountError> {
    match json {
        Some(json) if !json.trim().is_empty() => {
            Ok(SearchModalConfig::from_json_str(json)?.validated()?)
        }
        _ => Ok(SearchModalConfig::default()),
    }
}

pub(crate) fn trigger_attributes(config: &SearchModalConfig) -> [(&'static str, String); 2] {
    [
        ("aria-label", config.trigger_label.clone()),
        ("title", config.trigger_label.clone()),
    ]
}

pub(crate) fn icon_attributes(icon_ref: &str) -> [(&'static str, String); 2] {
    [
        ("loading", "eager".to_owned()),
        (ICON_SOURCE_ATTRIBUTE, icon_ref.to_owned()),
    ]
}

/// Shadow-tree element that carries a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
    Trigger,
    Dialog,
    /// The dialog closing itself (Escape, `form method=dialog`).
    DialogClose,
    Content,
    Search,
}

impl Part {
    pub(crate) const ALL: [Self; 5] = [
        Self::Trigger,
        Self::Dialog,
        Self::DialogClose,
        Self::Content,
        Self::Search,
    ];

    /// DOM event the part listens for.
    pub(crate) const fn event(self) -> &'static str {
        match self {
            Self::Trigger | Self::Dialog | Self::Content => "click",
            Self::DialogClose | Self::Search => "close",
        }
    }

    /// Click surface handled at this part; `None` for close signals.
    pub(crate) const fn region(self) -> Option<ClickRegion> {
        match self {
            Self::Trigger => Some(ClickRegion::Trigger),
            Self::Dialog => Some(ClickRegion::Backdrop),
            Self::Content => Some(ClickRegion::Content),
            Self::DialogClose | Self::Search => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_or_blank_config_uses_defaults() {
        assert_eq!(parse_config(None).unwrap(), SearchModalConfig::default());
        assert_eq!(parse_config(Some("  ")).unwrap(), SearchModalConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = parse_config(Some(r#"{"icon_ref":"/x.svg#i","open":true}"#)).unwrap();
        assert_eq!(config.icon_ref, "/x.svg#i");
        assert!(config.open);
        assert_eq!(config.trigger_label, "Site search");
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            parse_config(Some(r#"{"trigger_label":""}"#)),
            Err(MountError::Config(_))
        ));
        assert!(matches!(
            parse_config(Some("not json")),
            Err(MountError::Config(_))
        ));
    }

    #[test]
    fn trigger_is_labelled_twice() {
        let attrs = trigger_attributes(&SearchModalConfig::default());
        assert_eq!(
            attrs,
            [
                ("aria-label", "Site search".to_string()),
                ("title", "Site search".to_string()),
            ]
        );
    }

    #[test]
    fn icon_loads_eagerly() {
        let attrs = icon_attributes("/images/icons/lit-search.svg#icon");
        assert_eq!(attrs[0], ("loading", "eager".to_string()));
        assert_eq!(attrs[1].1, "/images/icons/lit-search.svg#icon");
    }

    #[test]
    fn parts_map_to_click_surfaces() {
        let regions: Vec<_> = Part::ALL.iter().map(|p| p.region()).collect();
        assert_eq!(
            regions,
            vec![
                Some(ClickRegion::Trigger),
                Some(ClickRegion::Backdrop),
                None,
                Some(ClickRegion::Content),
                None,
            ]
        );
        for part in Part::ALL {
            let expected = if part.region().is_some() { "click" } else { "close" };
            assert_eq!(part.event(), expected, "{part:?}");
        }
    }

    #[test]
    fn native_dialog_close_routes_to_close_signal() {
        assert_eq!(Part::DialogClose.event(), "close");
        assert_eq!(Part::DialogClose.region(), None);
        assert!(Part::ALL.contains(&Part::DialogClose));
    }
}
