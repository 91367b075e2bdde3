//! Axial member properties.

use serde::{Deserialize, Serialize};

use crate::errors::MaterialPropertyError;
use crate::MaterialId;

/// Physical properties shared by every link that references them.
///
/// A material bundles the cross-sectional area with the elastic modulus, so the
/// axial stiffness of a link is `area * modulus / length`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Identifier of the material within its model.
    pub id: MaterialId,
    /// Young's modulus.
    pub modulus: f64,
    /// Cross-sectional area.
    pub area: f64,
    /// Mass per unit volume; zero when unknown.
    #[serde(default)]
    pub density: f64,
}

impl Material {
    /// Create a validated material.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialPropertyError`] when `modulus` or `area` is not strictly
    /// positive, `density` is negative, or any value is not finite.
    ///
    /// # Examples
    /// ```
    /// use trusslink::Material;
    ///
    /// let steel = Material::new(0, 200.0e9, 0.01, 7_850.0).expect("valid steel");
    /// assert_eq!(steel.axial_rigidity(), 2.0e9);
    /// assert!(Material::new(1, 200.0e9, 0.0, 0.0).is_err());
    /// ```
    pub fn new(
        id: MaterialId,
        modulus: f64,
        area: f64,
        density: f64,
    ) -> Result<Self, MaterialPropertyError> {
        let material = Self {
            id,
            modulus,
            area,
            density,
        };
        material.validate()?;
        Ok(material)
    }

    /// Check the physical validity of the stored properties.
    ///
    /// # Errors
    ///
    /// See [`Material::new`].
    pub fn validate(&self) -> Result<(), MaterialPropertyError> {
        let material = self.id;
        if !(self.modulus.is_finite() && self.area.is_finite() && self.density.is_finite()) {
            return Err(MaterialPropertyError::NonFinite { material });
        }
        if self.modulus <= 0.0 {
            return Err(MaterialPropertyError::NonPositiveModulus {
                material,
                modulus: self.modulus,
            });
        }
        if self.area <= 0.0 {
            return Err(MaterialPropertyError::NonPositiveArea {
                material,
                area: self.area,
            });
        }
        if self.density < 0.0 {
            return Err(MaterialPropertyError::NegativeDensity {
                material,
                density: self.density,
            });
        }
        Ok(())
    }

    /// Product of area and modulus.
    #[must_use]
    pub fn axial_rigidity(&self) -> f64 {
        self.area * self.modulus
    }

    /// Mass carried by a member of this material with the given length.
    #[must_use]
    pub fn mass_of(&self, length: f64) -> f64 {
        length * self.area * self.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_physical_values() {
        assert!(matches!(
            Material::new(3, -1.0, 1.0, 0.0),
            Err(MaterialPropertyError::NonPositiveModulus { material: 3, .. })
        ));
        assert!(matches!(
            Material::new(3, 1.0, 1.0, -2.0),
            Err(MaterialPropertyError::NegativeDensity { .. })
        ));
        assert!(matches!(
            Material::new(3, f64::NAN, 1.0, 0.0),
            Err(MaterialPropertyError::NonFinite { .. })
        ));
    }

    #[test]
    fn legacy_records_default_density() {
        let material: Material =
            serde_json::from_str(r#"{"id":0,"modulus":10.0,"area":2.0}"#).expect("parses");
        assert_eq!(material.density, 0.0);
        assert_eq!(material.mass_of(4.0), 0.0);
    }
}
