//! Method registry for discovering and creating rating methods.
//!
//! This module provides metadata and discovery functionality for every
//! [`RatingMethod`] in the rs-rating-signals library, and builds methods by
//! name or alias.

use rs_rating_traits::{Interval, RatingMethod};
use serde::{Deserialize, Serialize};

use crate::{
    ibd_rs::{IbdRelativeStrength, IbdRelativeStrength3m},
    rsm::{DorseyRelativeStrength, MansfieldConfig, MansfieldRelativeStrength},
};

/// Method category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodCategory {
    /// Return-based ratings compared with a benchmark's returns.
    ReturnBased,
    /// Ratings built on the price ratio to a benchmark.
    PriceRatio,
}

impl MethodCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::ReturnBased => "Weighted or smoothed returns relative to a benchmark",
            Self::PriceRatio => "Price ratio to a benchmark and its trend",
        }
    }
}

/// Metadata about a rating method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    /// Unique identifier for the method
    pub name: &'static str,

    /// Alternative names accepted by [`create_method`]
    pub aliases: &'static [&'static str],

    /// Category classification
    pub category: MethodCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Interval the method is usually run at
    pub default_interval: Interval,
}

impl MethodInfo {
    /// Whether `name` is the method's name or one of its aliases.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.name == name || self.aliases.contains(&name.as_str())
    }
}

/// Get information about all available methods.
#[must_use]
pub fn available_methods() -> Vec<MethodInfo> {
    vec![
        MethodInfo {
            name: "ibd_rs",
            aliases: &["rs_12mo"],
            category: MethodCategory::ReturnBased,
            description: "IBD relative strength: quarter-weighted 12-month return",
            default_interval: Interval::Daily,
        },
        MethodInfo {
            name: "ibd_rs_3m",
            aliases: &["rs_3mo"],
            category: MethodCategory::ReturnBased,
            description: "IBD 3-month relative strength: EMA of returns",
            default_interval: Interval::Daily,
        },
        MethodInfo {
            name: "mansfield",
            aliases: &["rsm"],
            category: MethodCategory::PriceRatio,
            description: "Mansfield relative strength: price ratio vs its moving average",
            default_interval: Interval::Weekly,
        },
        MethodInfo {
            name: "dorsey",
            aliases: &["rsd"],
            category: MethodCategory::PriceRatio,
            description: "Dorsey relative strength: price ratio to the benchmark",
            default_interval: Interval::Weekly,
        },
    ]
}

/// Get all methods in a specific category.
#[must_use]
pub fn methods_by_category(category: &MethodCategory) -> Vec<MethodInfo> {
    available_methods()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a method by name or alias.
#[must_use]
pub fn get_method_info(name: &str) -> Option<MethodInfo> {
    available_methods().into_iter().find(|info| info.matches(name))
}

/// Create a method by name or alias, with its default configuration.
#[must_use]
pub fn create_method(name: &str) -> Option<Box<dyn RatingMethod>> {
    let info = get_method_info(name)?;
    let method: Box<dyn RatingMethod> = match info.name {
        "ibd_rs" => Box::new(IbdRelativeStrength),
        "ibd_rs_3m" => Box::new(IbdRelativeStrength3m),
        "mansfield" => Box::new(MansfieldRelativeStrength::new(MansfieldConfig::default())),
        "dorsey" => Box::new(DorseyRelativeStrength),
        _ => return None,
    };
    Some(method)
}
