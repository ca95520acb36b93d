use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::domain::Theme;

pub const DEFAULT_THEME_ID: &str = "ai-modern";

const THEMES: [Theme; 10] = [
    Theme {
        id: "ai-modern",
        primary: "6366F1",
        secondary: "8B5CF6",
        accent: "EC4899",
        background: "F8FAFC",
        text: "1E293B",
        light_background: "FFFFFF",
        gradient: ["6366F1", "8B5CF6"],
        accent_gradient: ["EC4899", "F59E0B"],
    },
    Theme {
        id: "ai-corporate",
        primary: "1E293B",
        secondary: "334155",
        accent: "3B82F6",
        background: "F8FAFC",
        text: "0F172A",
        light_background: "FFFFFF",
        gradient: ["1E293B", "334155"],
        accent_gradient: ["3B82F6", "1D4ED8"],
    },
    Theme {
        id: "ai-creative",
        primary: "8B5CF6",
        secondary: "EC4899",
        accent: "F59E0B",
        background: "FDF2F8",
        text: "1E293B",
        light_background: "FFFFFF",
        gradient: ["8B5CF6", "EC4899"],
        accent_gradient: ["F59E0B", "F97316"],
    },
    Theme {
        id: "ai-minimal",
        primary: "6B7280",
        secondary: "9CA3AF",
        accent: "D1D5DB",
        background: "FFFFFF",
        text: "374151",
        light_background: "F9FAFB",
        gradient: ["6B7280", "9CA3AF"],
        accent_gradient: ["D1D5DB", "E5E7EB"],
    },
    Theme {
        id: "ai-tech",
        primary: "059669",
        secondary: "10B981",
        accent: "34D399",
        background: "F0FDF4",
        text: "064E3B",
        light_background: "FFFFFF",
        gradient: ["059669", "10B981"],
        accent_gradient: ["34D399", "6EE7B7"],
    },
    Theme {
        id: "ai-data",
        primary: "DC2626",
        secondary: "EF4444",
        accent: "F87171",
        background: "FEF2F2",
        text: "7F1D1D",
        light_background: "FFFFFF",
        gradient: ["DC2626", "EF4444"],
        accent_gradient: ["F87171", "FCA5A5"],
    },
    // Legacy identifiers still sent by older clients.
    Theme {
        id: "modern",
        primary: "1E40AF",
        secondary: "7C3AED",
        accent: "F59E0B",
        background: "F8FAFC",
        text: "1E293B",
        light_background: "FFFFFF",
        gradient: ["1E40AF", "7C3AED"],
        accent_gradient: ["F59E0B", "F97316"],
    },
    Theme {
        id: "corporate",
        primary: "0F172A",
        secondary: "334155",
        accent: "3B82F6",
        background: "F8FAFC",
        text: "0F172A",
        light_background: "FFFFFF",
        gradient: ["0F172A", "334155"],
        accent_gradient: ["3B82F6", "1D4ED8"],
    },
    Theme {
        id: "creative",
        primary: "7C3AED",
        secondary: "EC4899",
        accent: "F59E0B",
        background: "FDF2F8",
        text: "1E293B",
        light_background: "FFFFFF",
        gradient: ["7C3AED", "EC4899"],
        accent_gradient: ["F59E0B", "F97316"],
    },
    Theme {
        id: "minimal",
        primary: "6B7280",
        secondary: "9CA3AF",
        accent: "D1D5DB",
        background: "FFFFFF",
        text: "374151",
        light_background: "F9FAFB",
        gradient: ["6B7280", "9CA3AF"],
        accent_gradient: ["D1D5DB", "E5E7EB"],
    },
];

static REGISTRY: Lazy<HashMap<&'static str, &'static Theme>> =
    Lazy::new(|| THEMES.iter().map(|theme| (theme.id, theme)).collect());

pub fn default_theme() -> Theme {
    THEMES[0]
}

/// Looks up a theme by identifier. Unknown identifiers map to the default theme.
pub fn resolve_theme(id: &str) -> Theme {
    lookup(id).unwrap_or_else(default_theme)
}

/// Like [`resolve_theme`], but an unknown identifier first falls back to the
/// legacy theme named by the presentation style.
pub fn resolve_theme_for_style(id: Option<&str>, style: Option<&str>) -> Theme {
    if let Some(theme) = id.and_then(lookup) {
        return theme;
    }

    let style = style.unwrap_or_default();
    ["Creative", "Corporate", "Minimal"]
        .iter()
        .find(|word| style.contains(*word))
        .and_then(|word| lookup(&word.to_lowercase()))
        .unwrap_or_else(default_theme)
}

/// Theme identifiers in declaration order.
pub fn available() -> Vec<&'static str> {
    THEMES.iter().map(|theme| theme.id).collect()
}

fn lookup(id: &str) -> Option<Theme> {
    REGISTRY.get(id.trim()).map(|theme| **theme)
}
