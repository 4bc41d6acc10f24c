//! Affiliate product recommendations

use serde::Serialize;

use plantdx_core::DiagnosisResult;

/// A product from the affiliate catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub price: &'static str,
    pub rating: f32,
    pub description: &'static str,
    pub affiliate_link: &'static str,
}

pub const PRODUCT_CATALOG: &[Product] = &[
    Product {
        id: 1,
        name: "Bonide Neem Oil Fungicide",
        price: "$19.99",
        rating: 4.5,
        description: "Natural fungicide and insecticide for plants - 32 oz",
        affiliate_link: "https://www.amazon.com/Bonide-811-Copper-Fungicide-16/dp/B00004R9VZ",
    },
    Product {
        id: 2,
        name: "Bonide Liquid Copper Fungicide",
        price: "$24.97",
        rating: 4.4,
        description: "Controls fungal diseases on vegetables and fruits - 32 oz",
        affiliate_link: "https://www.amazon.com/Bonide-Liquid-Copper-Fungicide-16/dp/B000H9B7B0",
    },
    Product {
        id: 3,
        name: "Miracle-Gro All Purpose Plant Food",
        price: "$16.99",
        rating: 4.6,
        description: "Water soluble all-purpose plant food - 5 lbs",
        affiliate_link: "https://www.amazon.com/Miracle-Gro-Water-Soluble-All-Purpose-Plant/dp/B00004R9VZ",
    },
    Product {
        id: 4,
        name: "Safer Brand Insecticidal Soap",
        price: "$12.99",
        rating: 4.3,
        description: "Organic insect control for plants - 32 oz concentrate",
        affiliate_link: "https://www.amazon.com/Safer-Brand-Insecticidal-Soap-Concentrate/dp/B00004R9VZ",
    },
    Product {
        id: 5,
        name: "Epsom Salt Magnesium Sulfate",
        price: "$8.99",
        rating: 4.7,
        description: "Natural magnesium and sulfur fertilizer - 5 lbs",
        affiliate_link: "https://www.amazon.com/Epsom-Salt-Magnesium-Sulfate-Fertilizer/dp/B07Z8Z8Z8Z",
    },
    Product {
        id: 6,
        name: "Bonide Fruit Tree Spray",
        price: "$34.99",
        rating: 4.5,
        description: "Complete garden disease control kit - 32 oz",
        affiliate_link: "https://www.amazon.com/Bonide-Complete-Garden-Disease-Control/dp/B00004R9VZ",
    },
];

/// Products to show next to a diagnosis. Nothing is offered when no plant
/// was analyzed.
pub fn recommend_products(result: &DiagnosisResult) -> &'static [Product] {
    if result.is_plant_analysis() {
        PRODUCT_CATALOG
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendations_follow_result() {
        assert_eq!(recommend_products(&DiagnosisResult::parse_fallback()).len(), 6);
        assert_eq!(recommend_products(&DiagnosisResult::transport_fallback()).len(), 6);
        assert!(recommend_products(&DiagnosisResult::not_plant(None)).is_empty());
        assert!(recommend_products(&DiagnosisResult::analysis_error(None)).is_empty());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<u32> = PRODUCT_CATALOG.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRODUCT_CATALOG.len());
        assert!(PRODUCT_CATALOG.iter().all(|p| p.affiliate_link.starts_with("https://")));
    }
}
