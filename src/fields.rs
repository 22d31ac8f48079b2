//! Top-level scalar fields of a `tiapp.xml` descriptor.
//!
//! Each field is a direct child element of the root holding plain text, such
//! as `<id>com.example.app</id>` or `<sdk-version>12.2.0.GA</sdk-version>`.
//! Fields whose element name contains a dash can also be addressed by a
//! camel-cased alias (`sdkVersion` for `sdk-version`); both names resolve to
//! the same [`Field`].

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A known top-level scalar element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Version,
    Publisher,
    Url,
    Description,
    Copyright,
    Icon,
    Analytics,
    Guid,
    NavbarHidden,
    Fullscreen,
    StatusbarHidden,
    SdkVersion,
    PersistentWifi,
    PrerenderedIcon,
    StatusbarStyle,
    Transparency,
}

impl Field {
    /// Every field, in the order they conventionally appear in a descriptor.
    pub const ALL: [Field; 18] = [
        Field::Id,
        Field::Name,
        Field::Version,
        Field::Publisher,
        Field::Url,
        Field::Description,
        Field::Copyright,
        Field::Icon,
        Field::Analytics,
        Field::Guid,
        Field::NavbarHidden,
        Field::Fullscreen,
        Field::StatusbarHidden,
        Field::SdkVersion,
        Field::PersistentWifi,
        Field::PrerenderedIcon,
        Field::StatusbarStyle,
        Field::Transparency,
    ];

    /// The element name as written in the XML.
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Version => "version",
            Field::Publisher => "publisher",
            Field::Url => "url",
            Field::Description => "description",
            Field::Copyright => "copyright",
            Field::Icon => "icon",
            Field::Analytics => "analytics",
            Field::Guid => "guid",
            Field::NavbarHidden => "navbar-hidden",
            Field::Fullscreen => "fullscreen",
            Field::StatusbarHidden => "statusbar-hidden",
            Field::SdkVersion => "sdk-version",
            Field::PersistentWifi => "persistent-wifi",
            Field::PrerenderedIcon => "prerendered-icon",
            Field::StatusbarStyle => "statusbar-style",
            Field::Transparency => "transparency",
        }
    }

    /// The camel-cased alias, e.g. `sdkVersion`. Identical to [`Field::name`]
    /// for names without a dash.
    pub fn camel_name(self) -> String {
        dash_to_camel_case(self.name())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s || field.camel_name() == s)
            .ok_or_else(|| Error::argument(format!("unknown field '{}'", s)))
    }
}

/// Convert a dashed name to camel case: `statusbar-hidden` -> `statusbarHidden`.
pub fn dash_to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
