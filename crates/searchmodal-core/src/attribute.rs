#![forbid(unsafe_code)]

//! HTML attribute conversion for the search modal element.
//!
//! - `open` is a boolean attribute: present (any value, including `""`)
//!   means `true`, absent means `false`.
//! - `iconsrc` (also accepted as `icon-src`) carries the icon reference
//!   verbatim. Removing it restores the default icon.
//!
//! Attribute names are matched ASCII case-insensitively, as HTML does.
//! Unknown attributes convert to `None` and are ignored by the element.

/// Boolean attribute mirroring the `open` property.
pub const OPEN_ATTRIBUTE: &str = "open";

/// Attribute names accepted for the icon reference.
pub const ICON_ATTRIBUTES: [&str; 2] = ["iconsrc", "icon-src"];

/// Every attribute a host element should observe.
pub const OBSERVED_ATTRIBUTES: [&str; 3] = [OPEN_ATTRIBUTE, ICON_ATTRIBUTES[0], ICON_ATTRIBUTES[1]];

/// A property write derived from an attribute change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeChange {
    /// Write `open`.
    Open(bool),
    /// Write the icon reference; `None` restores the default.
    IconRef(Option<String>),
}

/// Convert an attribute mutation into a property write.
///
/// `value` is the new attribute value, `None` when the attribute was removed.
#[must_use]
pub fn parse_attribute(name: &str, value: Option<&str>) -> Option<AttributeChange> {
    if name.eq_ignore_ascii_case(OPEN_ATTRIBUTE) {
        return Some(AttributeChange::Open(value.is_some()));
    }
    if ICON_ATTRIBUTES
        .iter()
        .any(|attr| name.eq_ignore_ascii_case(attr))
    {
        return Some(AttributeChange::IconRef(value.map(str::to_owned)));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_presence_based() {
        assert_eq!(
            parse_attribute("open", Some("")),
            Some(AttributeChange::Open(true))
        );
        assert_eq!(
            parse_attribute("open", Some("false")),
            Some(AttributeChange::Open(true)),
            "boolean attributes ignore their value"
        );
        assert_eq!(
            parse_attribute("open", None),
            Some(AttributeChange::Open(false))
        );
    }

    #[test]
    fn icon_attribute_aliases() {
        for name in ["iconsrc", "icon-src", "iconSrc", "ICON-SRC"] {
            assert_eq!(
                parse_attribute(name, Some("/x.svg#icon")),
                Some(AttributeChange::IconRef(Some("/x.svg#icon".into()))),
                "{name} should map to the icon reference"
            );
        }
    }

    #[test]
    fn removing_icon_restores_default() {
        assert_eq!(
            parse_attribute("iconsrc", None),
            Some(AttributeChange::IconRef(None))
        );
    }

    #[test]
    fn unknown_attribute_is_ignored() {
        assert_eq!(parse_attribute("title", Some("x")), None);
    }

    #[test]
    fn observed_list_covers_all_names() {
        for name in OBSERVED_ATTRIBUTES {
            assert!(parse_attribute(name, None).is_some(), "{name}");
        }
    }
}
