//! Closed vocabularies shared by knowledge-base authoring and query validation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Returned by `FromStr` when a value is outside the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownValue {
	pub value: String,
	pub allowed: Vec<&'static str>,
}

macro_rules! vocabulary {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$($variant:ident => $label:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
		pub enum $name {
			$(
				#[serde(rename = $label)]
				$variant,
			)+
		}
		impl $name {
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];

			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)+
				}
			}

			pub fn labels() -> Vec<&'static str> {
				Self::ALL.iter().map(|value| value.as_str()).collect()
			}

			/// Zero-based position on the ordered scale.
			pub fn ordinal(self) -> usize {
				Self::ALL.iter().position(|value| *value == self).unwrap_or_default()
			}
		}
		impl FromStr for $name {
			type Err = UnknownValue;

			fn from_str(raw: &str) -> Result<Self, Self::Err> {
				let needle = raw.trim().to_ascii_lowercase();

				Self::ALL
					.iter()
					.copied()
					.find(|value| value.as_str() == needle)
					.ok_or_else(|| UnknownValue { value: raw.to_string(), allowed: Self::labels() })
			}
		}
		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}

vocabulary! {
	pub enum Industry {
		ECommerce => "e_commerce",
		Retail => "retail",
		Banking => "banking",
		Finance => "finance",
		Insurance => "insurance",
		Healthcare => "healthcare",
		Education => "education",
		Technology => "technology",
		Saas => "saas",
		Telecom => "telecom",
		Hospitality => "hospitality",
		Travel => "travel",
		Logistics => "logistics",
		Manufacturing => "manufacturing",
		RealEstate => "real_estate",
		FoodAndBeverage => "food_and_beverage",
		Media => "media",
		PublicSector => "public_sector",
	}
}

vocabulary! {
	pub enum CompanySize {
		Startup => "startup",
		Small => "small",
		Medium => "medium",
		Large => "large",
		Enterprise => "enterprise",
	}
}

vocabulary! {
	pub enum UrgencyLevel {
		Low => "low",
		Medium => "medium",
		High => "high",
		Critical => "critical",
	}
}

vocabulary! {
	pub enum ComplexityLevel {
		Low => "low",
		Medium => "medium",
		High => "high",
	}
}

vocabulary! {
	/// Shared by the query's budget range and a solution's estimated cost.
	pub enum CostLevel {
		Low => "low",
		Medium => "medium",
		High => "high",
		Premium => "premium",
	}
}

vocabulary! {
	pub enum Timeline {
		WithinOneMonth => "within_1_month",
		OneToThreeMonths => "1_to_3_months",
		ThreeToSixMonths => "3_to_6_months",
		SixToTwelveMonths => "6_to_12_months",
	}
}

impl Timeline {
	/// Inclusive range in days.
	pub fn day_range(self) -> (f32, f32) {
		match self {
			Self::WithinOneMonth => (0.0, 30.0),
			Self::OneToThreeMonths => (30.0, 90.0),
			Self::ThreeToSixMonths => (90.0, 180.0),
			Self::SixToTwelveMonths => (180.0, 365.0),
		}
	}
}
