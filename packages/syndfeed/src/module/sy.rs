//! Syndication module: how often a feed is updated.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use roxmltree::Node;

use super::base::Module;
use super::codec::ModuleCodec;
use super::contract::{Contract, PropertyKind, PropertyValue};
use crate::config::SY_NS;
use crate::date::{format_w3c, parse_date};
use crate::dialect::ParseContext;
use crate::error::{FeedError, Result};
use crate::xml::{child_text, XmlWriter};

/// Contract URI of the Syndication module.
pub const SY_URI: &str = SY_NS;

/// Period over which a channel is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePeriod {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl UpdatePeriod {
    pub const ALL: [UpdatePeriod; 5] = [
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for UpdatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdatePeriod {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| FeedError::invalid_value("updatePeriod", s))
    }
}

static SY_CONTRACT: LazyLock<Contract> = LazyLock::new(|| {
    let periods: Vec<&str> = UpdatePeriod::ALL.iter().map(UpdatePeriod::as_str).collect();
    Contract::new(SY_URI)
        .property("updatePeriod", PropertyKind::one_of(&periods))
        .property("updateFrequency", PropertyKind::Integer)
        .property("updateBase", PropertyKind::Date)
});

/// The Syndication contract.
#[must_use]
pub fn sy_contract() -> Contract {
    SY_CONTRACT.clone()
}

/// Typed Syndication implementation.
///
/// Setters validate their input and leave the module unchanged on error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyModule {
    update_period: Option<UpdatePeriod>,
    update_frequency: Option<i64>,
    update_base: Option<DateTime<Utc>>,
}

impl SyModule {
    #[must_use]
    pub fn update_period(&self) -> Option<UpdatePeriod> {
        self.update_period
    }

    /// Set the update period from its wire name.
    ///
    /// # Errors
    /// `InvalidValue` for anything outside hourly, daily, weekly, monthly or yearly.
    pub fn set_update_period(&mut self, period: &str) -> Result<()> {
        self.update_period = Some(period.parse()?);
        Ok(())
    }

    #[must_use]
    pub fn update_frequency(&self) -> Option<i64> {
        self.update_frequency
    }

    /// Set how many times per period the channel is updated.
    pub fn set_update_frequency(&mut self, frequency: Option<i64>) {
        self.update_frequency = frequency;
    }

    #[must_use]
    pub fn update_base(&self) -> Option<DateTime<Utc>> {
        self.update_base
    }

    pub fn set_update_base(&mut self, base: Option<DateTime<Utc>>) {
        self.update_base = base;
    }
}

impl Module for SyModule {
    fn uri(&self) -> &str {
        SY_URI
    }

    fn property_names(&self) -> Vec<&str> {
        SY_CONTRACT.property_names().collect()
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "updatePeriod" => Some(self.update_period.map(|p| p.as_str()).into()),
            "updateFrequency" => Some(self.update_frequency.into()),
            "updateBase" => Some(self.update_base.into()),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        match name {
            "updatePeriod" => match value.into_text(name)? {
                Some(period) => self.set_update_period(&period)?,
                None => self.update_period = None,
            },
            "updateFrequency" => self.update_frequency = value.into_integer(name)?,
            "updateBase" => self.update_base = value.into_date(name)?,
            _ => {
                return Err(FeedError::UnknownProperty {
                    contract: SY_URI.to_string(),
                    property: name.to_string(),
                })
            }
        }
        Ok(())
    }

    fn clone_module(&self) -> Box<dyn Module> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Reads and writes `sy:*` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyCodec;

impl ModuleCodec for SyCodec {
    fn namespace_uri(&self) -> &'static str {
        SY_URI
    }

    fn prefix(&self) -> &'static str {
        "sy"
    }

    fn parse(&self, element: Node<'_, '_>, ctx: &ParseContext<'_>) -> Result<Option<Box<dyn Module>>> {
        let period = child_text(element, "updatePeriod", Some(SY_NS));
        let frequency = child_text(element, "updateFrequency", Some(SY_NS));
        let base = child_text(element, "updateBase", Some(SY_NS));
        if period.is_none() && frequency.is_none() && base.is_none() {
            return Ok(None);
        }

        let mut module = SyModule::default();
        if let Some(period) = period {
            module.set_update_period(&period)?;
        }
        if let Some(frequency) = frequency {
            let value = frequency
                .parse::<i64>()
                .map_err(|_| FeedError::invalid_value("updateFrequency", frequency.as_str()))?;
            module.set_update_frequency(Some(value));
        }
        if let Some(base) = base {
            module.update_base = parse_date(&base, ctx.locale);
            if module.update_base.is_none() {
                tracing::debug!(value = %base, "unparseable sy:updateBase ignored");
            }
        }
        Ok(Some(Box::new(module)))
    }

    fn generate(&self, module: &dyn Module, writer: &mut XmlWriter) -> Result<()> {
        let text = |name: &str| module.property(name).unwrap_or(PropertyValue::Null);

        if let Some(period) = text("updatePeriod").as_text() {
            writer.text_element("sy:updatePeriod", &[], period)?;
        }
        if let Some(frequency) = text("updateFrequency").as_integer() {
            writer.text_element("sy:updateFrequency", &[], &frequency.to_string())?;
        }
        if let Some(base) = text("updateBase").as_date() {
            writer.text_element("sy:updateBase", &[], &format_w3c(&base))?;
        }
        Ok(())
    }
}
