//! Catalog view logic - filtering and the featured subset
//!
//! Everything here is a pure function of the loaded listing set and the
//! active filter; loading itself happens in the chain layer.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::models::{Address, AppListing, Audience, B256, Category, ListingStatus, ListingTier};

/// Where the catalog listings come from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Built-in sample listings
    Sample,
    /// Approved listings read page by page from the app store contract
    #[default]
    Contract,
}

/// Active category/audience selection; `None` means "All"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub audience: Option<Audience>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.audience.is_none()
    }

    /// All → Tools → ... → Other → All
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::Tools),
            Some(Category::Other) => None,
            Some(c) => Some(c.next()),
        };
    }

    /// All → Humans → AIs → All. The "Both" pill clears the filter.
    pub fn cycle_audience(&mut self) {
        self.audience = match self.audience {
            None | Some(Audience::Both) => Some(Audience::Humans),
            Some(Audience::Humans) => Some(Audience::AIs),
            Some(Audience::AIs) => None,
        };
    }

    pub fn clear(&mut self) {
        self.category = None;
        self.audience = None;
    }

    pub fn matches(&self, listing: &AppListing) -> bool {
        self.category.map_or(true, |c| listing.category == c)
            && self.audience.map_or(true, |a| listing.audience == a)
    }
}

/// Subset of `listings` matching both filters, in source order
pub fn apply_filters(
    listings: &[AppListing],
    category: Option<Category>,
    audience: Option<Audience>,
) -> Vec<AppListing> {
    let filter = CatalogFilter { category, audience };
    listings.iter().filter(|l| filter.matches(l)).cloned().collect()
}

/// Listings shown in the highlighted section; they stay in the main grid too
pub fn featured(listings: &[AppListing]) -> Vec<AppListing> {
    listings.iter().filter(|l| l.is_featured()).cloned().collect()
}

/// Headline numbers shown above the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_apps: U256,
    pub total_burned: U256,
}

/// Listings shown before the contract-backed catalog is wired or when
/// `catalog_source: sample` is configured
pub fn sample_listings() -> Vec<AppListing> {
    let mut id = [0u8; 32];
    id[31] = 1;
    vec![AppListing {
        id: B256(id),
        owner: Address::ZERO,
        name: String::from("Ember Staking"),
        description: String::from(
            "Stake EMBER tokens and earn protocol fees from the Ember ecosystem",
        ),
        url: String::from("https://ember.engineer/staking"),
        icon_url: String::from("💎"),
        category: Category::DeFi,
        audience: Audience::Both,
        status: ListingStatus::Approved,
        tier: ListingTier::Featured,
        featured_until: None,
        submitted_at: None,
        approved_at: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, category: Category, audience: Audience, tier: ListingTier) -> AppListing {
        AppListing {
            id: B256::default(),
            owner: Address::ZERO,
            name: name.to_string(),
            description: String::new(),
            url: format!("https://{}.example", name),
            icon_url: String::new(),
            category,
            audience,
            status: ListingStatus::Approved,
            tier,
            featured_until: None,
            submitted_at: None,
            approved_at: None,
        }
    }

    fn sample_set() -> Vec<AppListing> {
        vec![
            listing("swap", Category::DeFi, Audience::Both, ListingTier::Basic),
            listing("chess", Category::Games, Audience::Humans, ListingTier::Featured),
            listing("vault", Category::DeFi, Audience::AIs, ListingTier::Premium),
            listing("chat", Category::Social, Audience::Humans, ListingTier::Basic),
        ]
    }

    #[test]
    fn test_filter_by_category_only() {
        let listings = vec![
            listing("defi", Category::DeFi, Audience::Both, ListingTier::Basic),
            listing("game", Category::Games, Audience::Humans, ListingTier::Basic),
        ];
        let result = apply_filters(&listings, Some(Category::DeFi), None);
        assert_eq!(result, vec![listings[0].clone()]);
    }

    #[test]
    fn test_filter_matches_both_dimensions() {
        let listings = sample_set();
        let result = apply_filters(&listings, Some(Category::DeFi), Some(Audience::AIs));
        let names: Vec<&str> = result.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["vault"]);

        let humans = apply_filters(&listings, None, Some(Audience::Humans));
        let names: Vec<&str> = humans.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["chess", "chat"]);
    }

    #[test]
    fn test_unset_filters_keep_everything_in_order() {
        let listings = sample_set();
        assert_eq!(apply_filters(&listings, None, None), listings);
    }

    #[test]
    fn test_empty_result_when_nothing_matches() {
        let listings = sample_set();
        assert!(apply_filters(&listings, Some(Category::Utils), None).is_empty());
        assert!(apply_filters(&listings, Some(Category::Games), Some(Audience::AIs)).is_empty());
        assert!(apply_filters(&[], Some(Category::DeFi), None).is_empty());
    }

    #[test]
    fn test_filters_are_idempotent() {
        let listings = sample_set();
        for category in [None, Some(Category::DeFi), Some(Category::Social)] {
            for audience in [None, Some(Audience::Humans), Some(Audience::AIs)] {
                let once = apply_filters(&listings, category, audience);
                let twice = apply_filters(&once, category, audience);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_featured_subset() {
        let listings = sample_set();
        let names: Vec<String> = featured(&listings).into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["chess", "vault"]);
        assert_eq!(featured(&sample_listings()).len(), 1);
    }

    #[test]
    fn test_filter_cycling() {
        let mut filter = CatalogFilter::default();
        filter.cycle_category();
        assert_eq!(filter.category, Some(Category::Tools));
        for _ in 0..5 {
            filter.cycle_category();
        }
        assert_eq!(filter.category, Some(Category::Other));
        filter.cycle_category();
        assert_eq!(filter.category, None);

        filter.cycle_audience();
        assert_eq!(filter.audience, Some(Audience::Humans));
        filter.cycle_audience();
        assert_eq!(filter.audience, Some(Audience::AIs));
        filter.cycle_audience();
        assert_eq!(filter.audience, None);

        filter.category = Some(Category::Games);
        filter.clear();
        assert!(filter.is_empty());
    }
}
