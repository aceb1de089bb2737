//! Registry of retailer fuel-price feeds.
//!
//! UK retailers publish their pump prices as open JSON documents. This module
//! lists the feeds the server aggregates, in the order their stations appear
//! in the combined output.

use std::borrow::Cow;
use std::fmt;

/// One retailer feed: a display name and the URL its JSON is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Provider name, used as the brand when a station omits one.
    pub name: Cow<'static, str>,

    /// Feed URL.
    pub url: Cow<'static, str>,
}

impl Source {
    /// Create a source entry from static strings.
    pub const fn new(name: &'static str, url: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            url: Cow::Borrowed(url),
        }
    }

    /// Create a source entry from runtime values.
    pub fn owned(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            url: Cow::Owned(url.into()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.url)
    }
}

/// Feeds published under the UK open fuel-price data scheme.
///
/// The bp feed is left out: it has not served JSON at its published URL.
/// Shell's entry points at an HTML page and fails to parse on every fetch;
/// it stays registered so it is picked up if the URL starts serving JSON.
pub static UK_RETAILERS: &[Source] = &[
    Source::new(
        "Applegreen UK",
        "https://applegreenstores.com/fuel-prices/data.json",
    ),
    Source::new(
        "Ascona Group",
        "https://fuelprices.asconagroup.co.uk/newfuel.json",
    ),
    Source::new("Asda", "https://storelocator.asda.com/fuel_prices_data.json"),
    Source::new(
        "Esso Tesco Alliance",
        "https://fuelprices.esso.co.uk/latestdata.json",
    ),
    Source::new(
        "JET Retail UK",
        "https://jetlocal.co.uk/fuel_prices_data.json",
    ),
    Source::new(
        "Karan Retail Ltd",
        "https://api2.krlmedia.com/integration/live_price/krl",
    ),
    Source::new("Morrisons", "https://www.morrisons.com/fuel-prices/fuel.json"),
    Source::new("Moto", "https://moto-way.com/fuel-price/fuel_prices.json"),
    Source::new(
        "Motor Fuel Group",
        "https://fuel.motorfuelgroup.com/fuel_prices_data.json",
    ),
    Source::new(
        "Rontec",
        "https://www.rontec-servicestations.co.uk/fuel-prices/data/fuel_prices_data.json",
    ),
    Source::new(
        "Sainsbury\u{2019}s",
        "https://api.sainsburys.co.uk/v1/exports/latest/fuel_prices_data.json",
    ),
    Source::new("Shell", "https://www.shell.co.uk/fuel-prices-data.html"),
    Source::new(
        "Tesco",
        "https://www.tesco.com/fuel_prices/fuel_prices_data.json",
    ),
];

/// The default registry.
pub fn uk_retailers() -> &'static [Source] {
    UK_RETAILERS
}
