use serde::Serialize;

/// Named color role set applied uniformly across a deck.
///
/// Colors are six-digit RGB hex strings without a leading `#`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub light_background: &'static str,
    /// Stops of the main gradient used on title pages and header bands.
    pub gradient: [&'static str; 2],
    pub accent_gradient: [&'static str; 2],
}

impl Theme {
    pub fn main_gradient(&self) -> Gradient {
        Gradient::new(self.gradient[0], self.gradient[1])
    }
}

/// Two-stop linear gradient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
    /// Direction in whole degrees, 0 = left to right.
    pub angle: u16,
}

impl Gradient {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            angle: 45,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_gradient_uses_theme_stops() {
        let theme = Theme {
            id: "test",
            primary: "111111",
            secondary: "222222",
            accent: "333333",
            background: "FFFFFF",
            text: "000000",
            light_background: "EEEEEE",
            gradient: ["6366F1", "8B5CF6"],
            accent_gradient: ["EC4899", "F59E0B"],
        };

        let gradient = theme.main_gradient();
        assert_eq!((gradient.from.as_str(), gradient.to.as_str()), ("6366F1", "8B5CF6"));
        assert_eq!(gradient.angle, 45);
    }
}
