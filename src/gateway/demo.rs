//! Bundled demo catalog.
//!
//! Served whenever no supplier credential is configured or the upstream
//! listing call fails, so the shop always has a product grid to render.
//! Category filtering and pagination are applied locally to mirror the
//! upstream listing contract.

use crate::domain::product::Product;
use crate::gateway::catalog::CatalogPage;

fn product(
    id: &str,
    name: &str,
    sku: &str,
    cost: &str,
    color: Option<&str>,
    categories: &[&str],
    inventory: i64,
    description: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        sku: sku.to_string(),
        suggested_cost: cost.to_string(),
        weight_grams: None,
        color: color.map(str::to_string),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        inventory_count: inventory,
        description: description.to_string(),
        expired: false,
    }
}

pub fn demo_catalog() -> Vec<Product> {
    vec![
        product("demo-001", "Velvet Matte Lipstick", "LIP-VELVET-01", "12.50", Some("Rouge Noir"), &["lips"], 24, "Long-wear matte lipstick with a velvet finish."),
        product("demo-002", "Silk Finish Foundation", "FACE-SILK-02", "18.00", Some("Warm Beige"), &["face"], 16, "Buildable medium-coverage liquid foundation."),
        product("demo-003", "Rose Glow Blush", "FACE-ROSE-03", "9.75", Some("Dusty Rose"), &["face"], 30, "Pressed powder blush with a soft-focus glow."),
        product("demo-004", "Precision Liquid Eyeliner", "EYES-LINE-04", "7.40", Some("Jet Black"), &["eyes"], 42, "Smudge-proof liner with a 0.1mm felt tip."),
        product("demo-005", "Lash Volume Mascara", "EYES-LASH-05", "11.20", Some("Carbon Black"), &["eyes"], 35, "Lengthening and volumizing tubing mascara."),
        product("demo-006", "Shimmer Eyeshadow Palette", "EYES-SHIM-06", "22.90", None, &["eyes"], 12, "Twelve-shade palette of shimmers and mattes."),
        product("demo-007", "Hydrating Setting Spray", "FACE-SET-07", "13.60", None, &["face", "tools"], 20, "Weightless mist that locks makeup for 16 hours."),
        product("demo-008", "Pro Blender Sponge", "TOOL-BLND-08", "4.25", Some("Coral"), &["tools"], 60, "Latex-free sponge for seamless blending."),
        product("demo-009", "Angled Kabuki Brush", "TOOL-KBKI-09", "8.90", None, &["tools"], 28, "Dense synthetic brush for contour and bronzer."),
        product("demo-010", "Nude Lip Gloss", "LIP-GLOS-10", "6.80", Some("Honey Nude"), &["lips"], 44, "Non-sticky high-shine gloss."),
    ]
}

/// Build a demo listing page with the same shape the upstream listing has.
pub fn demo_page(page: u32, page_size: u32, category: Option<&str>, error: Option<String>) -> CatalogPage {
    let page = page.max(1);
    let page_size = page_size.clamp(1, 100);

    let filtered: Vec<Product> = demo_catalog()
        .into_iter()
        .filter(|p| category.map_or(true, |c| p.in_category(c)))
        .collect();
    let count = filtered.len() as u64;

    let start = ((page - 1) as usize).saturating_mul(page_size as usize);
    let results: Vec<Product> = filtered.into_iter().skip(start).take(page_size as usize).collect();

    let has_next = (start + results.len()) < count as usize;
    CatalogPage {
        count,
        next: has_next.then(|| format!("?page={}&page_size={page_size}", page + 1)),
        previous: (page > 1).then(|| format!("?page={}&page_size={page_size}", page - 1)),
        results,
        is_demo: true,
        error,
    }
}
