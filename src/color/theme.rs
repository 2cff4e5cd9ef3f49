use super::Role;
use crossterm::style::Color;

/// One role's color in both backends
pub struct Swatch {
    pub ansi: Color,
    pub html: &'static str,
}

pub struct Theme {
    pub muted: Swatch,     // Grey
    pub marker: Swatch,    // Yellow
    pub text: Swatch,      // Lime
    pub number: Swatch,    // Cyan
    pub reference: Swatch, // Light grey
    pub key: Swatch,       // Magenta
    pub default: Swatch,   // Orange, also the HTML fallback
}

pub const DEFAULT_THEME: Theme = Theme {
    muted: Swatch {
        ansi: Color::DarkGrey,
        html: "#999",
    },
    marker: Swatch {
        ansi: Color::DarkYellow,
        html: "#ffb400",
    },
    text: Swatch {
        ansi: Color::AnsiValue(113),
        html: "#80ff80",
    },
    number: Swatch {
        ansi: Color::AnsiValue(38),
        html: "#40c0ff",
    },
    reference: Swatch {
        ansi: Color::AnsiValue(247),
        html: "#aaa",
    },
    key: Swatch {
        ansi: Color::AnsiValue(170),
        html: "#d087d0",
    },
    default: Swatch {
        ansi: Color::AnsiValue(208),
        html: "#ff7f00",
    },
};

impl Theme {
    pub fn swatch(&self, role: Role) -> &Swatch {
        match role {
            Role::Muted => &self.muted,
            Role::Marker => &self.marker,
            Role::Text => &self.text,
            Role::Number => &self.number,
            Role::Reference => &self.reference,
            Role::Key => &self.key,
            Role::Default => &self.default,
        }
    }
}
