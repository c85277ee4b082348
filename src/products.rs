//A storefront product: static catalog data shared by all three tools.

/// A product sold by the store.
///
/// - `queries` feed the image fetcher (one API search per query).
/// - `demographics` fill the `{demographic}` placeholder in marketing hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub sku: &'static str,
    pub category: &'static str,
    /// Price in dollars, stored as cents to keep the catalog const-friendly.
    pub price_cents: u64,
    pub key_feature: &'static str,
    pub features: &'static [&'static str],
    pub queries: &'static [&'static str],
    pub demographics: &'static [&'static str],
}

impl Product {
    pub fn price(&self) -> f64 {
        self.price_cents as f64 / 100.0
    }

    pub fn supported() -> &'static [Product] {
        &[
            GALAXY_STAR_PROJECTOR,
            POSTURE_CORRECTOR,
            LED_STRIP_LIGHTS,
            PORTABLE_BLENDER,
        ]
    }

    pub fn find(id: &str) -> Option<&'static Product> {
        Product::supported().iter().find(|p| p.id == id)
    }
}

pub const GALAXY_STAR_PROJECTOR: Product = Product {
    id: "galaxy-star-projector",
    name: "Galaxy Star Projector Pro",
    sku: "GSP-001",
    category: "Smart Home",
    price_cents: 3499,
    key_feature: "16 million colors + Bluetooth speaker",
    features: &[
        "16 million LED colors",
        "Built-in Bluetooth speaker",
        "Timer function",
        "Remote control",
    ],
    queries: &[
        "galaxy projector bedroom",
        "starry night ceiling",
        "aurora lights room",
        "nebula projector light",
        "cosmic bedroom aesthetic",
    ],
    demographics: &["girl", "guy", "college student", "parent", "gamer"],
};

pub const POSTURE_CORRECTOR: Product = Product {
    id: "posture-corrector",
    name: "Posture Corrector Pro",
    sku: "PCP-001",
    category: "Health & Wellness",
    price_cents: 2499,
    key_feature: "Invisible under clothes, doctor recommended",
    features: &[
        "Invisible design",
        "Breathable mesh",
        "Adjustable straps",
        "Doctor recommended",
    ],
    queries: &[
        "good posture",
        "back support",
        "office ergonomics",
        "spine health",
        "desk posture",
    ],
    demographics: &["office worker", "remote worker", "student", "adult"],
};

pub const LED_STRIP_LIGHTS: Product = Product {
    id: "led-strip-lights",
    name: "Smart LED Strip Lights 65ft",
    sku: "LSL-001",
    category: "Smart Home",
    price_cents: 2999,
    key_feature: "65ft with music sync",
    features: &[
        "65ft total length",
        "Music sync",
        "App control",
        "Works with Alexa",
    ],
    queries: &[
        "LED strip bedroom",
        "RGB gaming setup",
        "neon room aesthetic",
        "colorful room lights",
        "gaming room purple",
    ],
    demographics: &["gamer", "streamer", "content creator", "guy", "girl"],
};

pub const PORTABLE_BLENDER: Product = Product {
    id: "portable-blender",
    name: "Portable Blender USB-C",
    sku: "PBU-001",
    category: "Kitchen",
    price_cents: 2799,
    key_feature: "USB-C rechargeable with 6 blades",
    features: &[
        "USB-C charging",
        "6 powerful blades",
        "20oz capacity",
        "15+ blends per charge",
    ],
    queries: &[
        "smoothie healthy",
        "protein shake gym",
        "fruit blender",
        "healthy drink",
        "fitness smoothie",
    ],
    demographics: &["gym bro", "fitness girl", "health enthusiast", "busy person"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_and_unknown_product() {
        assert_eq!(
            Product::find("led-strip-lights").map(|p| p.name),
            Some("Smart LED Strip Lights 65ft")
        );
        assert!(Product::find("hoverboard").is_none());
    }

    #[test]
    fn test_prices_are_dollars() {
        assert!((GALAXY_STAR_PROJECTOR.price() - 34.99).abs() < 1e-9);
    }

    #[test]
    fn test_every_product_has_queries_and_demographics() {
        for p in Product::supported() {
            assert!(!p.queries.is_empty(), "{} has no search queries", p.id);
            assert!(!p.demographics.is_empty(), "{} has no demographics", p.id);
        }
    }
}
