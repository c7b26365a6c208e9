//! Campsite and facility types.
//!
//! A facility groups campsites; a campsite is the bookable unit with a
//! finite number of spots per day ([`Capacity`]). Campsites carry named
//! attributes (with a value) and named equipment, both resolved against
//! reference catalogs when the campsite is created.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Identifier of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(i64);

impl FacilityId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a campsite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampsiteId(i64);

impl CampsiteId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CampsiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of spots a campsite offers per day. Always positive.
///
/// # Examples
///
/// ```
/// use campground::Capacity;
///
/// let capacity = Capacity::try_from(3).unwrap();
/// assert_eq!(capacity.value(), 3);
/// assert!(Capacity::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    /// Returns the number of spots.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Capacity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ValidationError {
                field: "capacity".into(),
                message: "capacity must be a positive integer".into(),
            });
        }
        Ok(Self(value))
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical camp location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    /// Facility id.
    pub id: FacilityId,
    /// Display name.
    pub name: String,
}

/// A stored campsite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campsite {
    id: CampsiteId,
    facility_id: FacilityId,
    loop_name: String,
    name: String,
    capacity: Capacity,
    active: bool,
}

impl Campsite {
    /// Assembles a campsite from stored fields.
    #[must_use]
    pub fn new(
        id: CampsiteId,
        facility_id: FacilityId,
        loop_name: String,
        name: String,
        capacity: Capacity,
        active: bool,
    ) -> Self {
        Self {
            id,
            facility_id,
            loop_name,
            name,
            capacity,
            active,
        }
    }

    /// Returns the campsite id.
    #[must_use]
    pub const fn id(&self) -> CampsiteId {
        self.id
    }

    /// Returns the owning facility.
    #[must_use]
    pub const fn facility_id(&self) -> FacilityId {
        self.facility_id
    }

    /// Returns the loop the campsite sits on.
    #[must_use]
    pub fn loop_name(&self) -> &str {
        &self.loop_name
    }

    /// Returns the campsite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the daily capacity.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns whether the campsite accepts bookings.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A named attribute attached to a campsite, e.g. `shade = partial`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampsiteAttribute {
    /// Attribute name as listed in the attribute catalog.
    pub name: String,
    /// Attribute value. Must not be blank.
    pub value: String,
}

impl CampsiteAttribute {
    /// Creates an attribute pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A campsite together with its attributes and equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampsiteDetails {
    /// The campsite row.
    pub campsite: Campsite,
    /// Attached attributes, ordered by name.
    pub attributes: Vec<CampsiteAttribute>,
    /// Attached equipment names, ordered by name.
    pub equipment: Vec<String>,
}

/// A campsite that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampsite {
    facility_id: FacilityId,
    loop_name: String,
    name: String,
    capacity: Capacity,
    attributes: Vec<CampsiteAttribute>,
    equipment: Vec<String>,
}

impl NewCampsite {
    /// Starts building a campsite.
    ///
    /// # Examples
    ///
    /// ```
    /// use campground::{Capacity, FacilityId, NewCampsite};
    ///
    /// let campsite = NewCampsite::builder(FacilityId::new(1), "A", "12", Capacity::try_from(4).unwrap())
    ///     .attribute("shade", "full")
    ///     .equipment("fire ring")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(campsite.name(), "12");
    /// assert_eq!(campsite.attributes().len(), 1);
    /// ```
    #[must_use]
    pub fn builder(
        facility_id: FacilityId,
        loop_name: impl Into<String>,
        name: impl Into<String>,
        capacity: Capacity,
    ) -> NewCampsiteBuilder {
        NewCampsiteBuilder {
            facility_id,
            loop_name: loop_name.into(),
            name: name.into(),
            capacity,
            attributes: Vec::new(),
            equipment: Vec::new(),
        }
    }

    /// Returns the owning facility.
    #[must_use]
    pub const fn facility_id(&self) -> FacilityId {
        self.facility_id
    }

    /// Returns the loop name.
    #[must_use]
    pub fn loop_name(&self) -> &str {
        &self.loop_name
    }

    /// Returns the campsite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the initial capacity.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns the attributes to attach.
    #[must_use]
    pub fn attributes(&self) -> &[CampsiteAttribute] {
        &self.attributes
    }

    /// Returns the equipment names to attach.
    #[must_use]
    pub fn equipment(&self) -> &[String] {
        &self.equipment
    }
}

/// Builder for [`NewCampsite`].
#[derive(Debug)]
pub struct NewCampsiteBuilder {
    facility_id: FacilityId,
    loop_name: String,
    name: String,
    capacity: Capacity,
    attributes: Vec<CampsiteAttribute>,
    equipment: Vec<String>,
}

impl NewCampsiteBuilder {
    /// Adds an attribute. Name and value are resolved and checked on insert.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(CampsiteAttribute::new(name, value));
        self
    }

    /// Adds several attributes at once.
    #[must_use]
    pub fn attributes(mut self, attributes: impl IntoIterator<Item = CampsiteAttribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Adds an equipment item by name.
    #[must_use]
    pub fn equipment(mut self, name: impl Into<String>) -> Self {
        self.equipment.push(name.into());
        self
    }

    /// Builds the campsite.
    ///
    /// Loop and campsite names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop name or campsite name is empty after trimming.
    pub fn build(self) -> Result<NewCampsite, ValidationError> {
        let loop_name = self.loop_name.trim().to_string();
        if loop_name.is_empty() {
            return Err(ValidationError {
                field: "loop".into(),
                message: "loop name must be non-empty after trimming whitespace".into(),
            });
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "campsite name must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(NewCampsite {
            facility_id: self.facility_id,
            loop_name,
            name,
            capacity: self.capacity,
            attributes: self.attributes,
            equipment: self.equipment,
        })
    }
}
