//! Panchang request and result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::EnumIter;

use crate::config::{DEFAULT_CITY, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE};

/// The seven quantities computed for a Panchang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Quantity {
    Tithi,
    Nakshatra,
    Yoga,
    Karan,
    RahuKaal,
    GulikaKaal,
    Abhijit,
}

/// How a calculation result becomes the quantity's field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Name-like attribute, else the string form
    Named,
    /// String form only
    Text,
}

/// One capability call in a quantity's probe chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub name: &'static str,
    /// Whether the time handle is passed as the argument
    pub with_time: bool,
}

const fn timed(name: &'static str) -> Probe {
    Probe {
        name,
        with_time: true,
    }
}

const fn bare(name: &'static str) -> Probe {
    Probe {
        name,
        with_time: false,
    }
}

impl Quantity {
    /// Key of the quantity's field in [`PanchangResult`].
    pub fn field(self) -> &'static str {
        match self {
            Quantity::Tithi => "tithi",
            Quantity::Nakshatra => "nakshatra",
            Quantity::Yoga => "yoga",
            Quantity::Karan => "karan",
            Quantity::RahuKaal => "rahu_kaal",
            Quantity::GulikaKaal => "gulika_kaal",
            Quantity::Abhijit => "abhijit",
        }
    }

    /// Prefix of the quantity's diagnostic keys (`<prefix>_obj`, `<prefix>_error`).
    pub fn diagnostic_prefix(self) -> &'static str {
        match self {
            Quantity::Tithi => "tithi",
            Quantity::Nakshatra => "nakshatra",
            Quantity::Yoga => "yoga",
            Quantity::Karan => "karan",
            Quantity::RahuKaal => "rahu",
            Quantity::GulikaKaal => "gulika",
            Quantity::Abhijit => "abhijit",
        }
    }

    /// Capability calls tried in order until one yields a value.
    pub fn probes(self) -> &'static [Probe] {
        const TITHI: &[Probe] = &[timed("TithiAtTime"), timed("AllTithiData")];
        const NAKSHATRA: &[Probe] = &[timed("NakshatraAtTime"), timed("AllNakshatraData")];
        const YOGA: &[Probe] = &[timed("YogaAtTime"), timed("AllYogaData")];
        const KARAN: &[Probe] = &[timed("KaranAtTime"), timed("AllKaranData")];
        const RAHU: &[Probe] = &[
            timed("RahuKaalAtDate"),
            timed("GetRahuKaal"),
            bare("RahuKaal"),
        ];
        const GULIKA: &[Probe] = &[timed("GulikaAtDate"), timed("GetGulika"), bare("Gulika")];
        const ABHIJIT: &[Probe] = &[timed("AbhijitAtDate"), timed("GetAbhijit")];

        match self {
            Quantity::Tithi => TITHI,
            Quantity::Nakshatra => NAKSHATRA,
            Quantity::Yoga => YOGA,
            Quantity::Karan => KARAN,
            Quantity::RahuKaal => RAHU,
            Quantity::GulikaKaal => GULIKA,
            Quantity::Abhijit => ABHIJIT,
        }
    }

    pub fn label_style(self) -> LabelStyle {
        match self {
            Quantity::Tithi | Quantity::Nakshatra | Quantity::Yoga | Quantity::Karan => {
                LabelStyle::Named
            }
            Quantity::RahuKaal | Quantity::GulikaKaal | Quantity::Abhijit => LabelStyle::Text,
        }
    }
}

/// Diagnostic map attached to every result as `raw`.
///
/// Entries are only ever added, in the order the assembler produces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Map<String, Value>);

impl Diagnostics {
    pub fn record(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON text of the whole map.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Panchang for one date and place.
///
/// Every field is always serialized; quantities that could not be computed
/// are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanchangResult {
    pub date: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tithi: Option<String>,
    pub nakshatra: Option<String>,
    pub yoga: Option<String>,
    pub karan: Option<String>,
    pub rahu_kaal: Option<String>,
    pub gulika_kaal: Option<String>,
    pub abhijit: Option<String>,
    pub raw: Diagnostics,
}

impl PanchangResult {
    /// Result shell with every quantity unset.
    pub fn new(date: impl Into<String>, city: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            date: date.into(),
            city: city.into(),
            latitude,
            longitude,
            tithi: None,
            nakshatra: None,
            yoga: None,
            karan: None,
            rahu_kaal: None,
            gulika_kaal: None,
            abhijit: None,
            raw: Diagnostics::default(),
        }
    }

    pub fn get(&self, quantity: Quantity) -> Option<&str> {
        self.slot(quantity).as_deref()
    }

    pub fn set(&mut self, quantity: Quantity, value: Option<String>) {
        *self.slot_mut(quantity) = value;
    }

    fn slot(&self, quantity: Quantity) -> &Option<String> {
        match quantity {
            Quantity::Tithi => &self.tithi,
            Quantity::Nakshatra => &self.nakshatra,
            Quantity::Yoga => &self.yoga,
            Quantity::Karan => &self.karan,
            Quantity::RahuKaal => &self.rahu_kaal,
            Quantity::GulikaKaal => &self.gulika_kaal,
            Quantity::Abhijit => &self.abhijit,
        }
    }

    fn slot_mut(&mut self, quantity: Quantity) -> &mut Option<String> {
        match quantity {
            Quantity::Tithi => &mut self.tithi,
            Quantity::Nakshatra => &mut self.nakshatra,
            Quantity::Yoga => &mut self.yoga,
            Quantity::Karan => &mut self.karan,
            Quantity::RahuKaal => &mut self.rahu_kaal,
            Quantity::GulikaKaal => &mut self.gulika_kaal,
            Quantity::Abhijit => &mut self.abhijit,
        }
    }
}

/// Query parameters of `GET /panchang`.
///
/// `tz` is accepted for compatibility but not applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanchangRequest {
    /// `YYYY-MM-DD` or a full time string; today when absent
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default = "default_latitude", alias = "latitude")]
    pub lat: f64,
    #[serde(default = "default_longitude", alias = "longitude")]
    pub lon: f64,
    #[serde(default = "default_timezone")]
    pub tz: String,
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

impl Default for PanchangRequest {
    fn default() -> Self {
        Self {
            date: None,
            lat: DEFAULT_LATITUDE,
            lon: DEFAULT_LONGITUDE,
            tz: default_timezone(),
            city: default_city(),
        }
    }
}
