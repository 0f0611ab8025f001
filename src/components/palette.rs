//! Icon and color palettes for storage locations and budget categories.

/// Icon names stored by the resources, with the glyph shown for each
pub const LOCATION_ICONS: &[(&str, &str)] = &[
    ("Package", "📦"),
    ("Refrigerator", "🧊"),
    ("Snowflake", "❄️"),
    ("Archive", "🗄️"),
    ("Home", "🏠"),
    ("ShoppingBasket", "🧺"),
    ("Wine", "🍷"),
    ("Apple", "🍎"),
];

pub const COLORS: &[&str] = &[
    "bg-blue-500",
    "bg-green-500",
    "bg-red-500",
    "bg-yellow-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-orange-500",
    "bg-gray-500",
];

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("ShoppingCart", "🛒"),
    ("Home", "🏠"),
    ("Car", "🚗"),
    ("Gamepad2", "🎮"),
    ("Heart", "❤️"),
    ("MoreHorizontal", "⋯"),
    ("Wallet", "👛"),
    ("Briefcase", "💼"),
    ("Gift", "🎁"),
    ("PlusCircle", "➕"),
];

/// Glyph for a stored icon name; unknown names fall back to a box
pub fn glyph(icon: &str) -> &'static str {
    LOCATION_ICONS
        .iter()
        .chain(CATEGORY_ICONS)
        .find(|(name, _)| *name == icon)
        .map(|(_, glyph)| *glyph)
        .unwrap_or("📦")
}
