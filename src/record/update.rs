use chrono::NaiveDate;

use super::model::{Address, Anniversary};

/// Field-by-field changes for an existing record.
///
/// `None` and empty strings both mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnniversaryUpdate {
    pub names: Option<String>,
    pub anniversary_date: Option<NaiveDate>,
    pub anniversary_type: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: AddressUpdate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressUpdate {
    pub street_address: Option<String>,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
}

impl AddressUpdate {
    pub fn is_empty(&self) -> bool {
        [
            &self.street_address,
            &self.municipality,
            &self.province,
            &self.postal_code,
        ]
        .iter()
        .all(|f| supplied(f).is_none())
    }

    /// A new address holding only the supplied sub-fields, `None` if nothing was supplied.
    pub fn to_address(&self) -> Option<Address> {
        if self.is_empty() {
            return None;
        }
        let mut address = Address::default();
        self.apply(&mut address);
        Some(address)
    }

    fn apply(&self, address: &mut Address) {
        merge(&mut address.street_address, &self.street_address);
        merge(&mut address.municipality, &self.municipality);
        merge(&mut address.province, &self.province);
        merge(&mut address.postal_code, &self.postal_code);
    }
}

impl AnniversaryUpdate {
    pub fn is_empty(&self) -> bool {
        [
            &self.names,
            &self.anniversary_type,
            &self.description,
            &self.email,
            &self.phone,
        ]
        .iter()
        .all(|f| supplied(f).is_none())
            && self.anniversary_date.is_none()
            && self.address.is_empty()
    }

    /// Produce the merged record, leaving `current` untouched.
    pub fn apply_to(&self, current: &Anniversary) -> Anniversary {
        let mut merged = current.clone();

        if let Some(names) = supplied(&self.names) {
            merged.names = names.to_string();
        }
        if let Some(date) = self.anniversary_date {
            merged.anniversary_date = date;
        }
        if let Some(kind) = supplied(&self.anniversary_type) {
            merged.anniversary_type = kind.to_string();
        }
        merge(&mut merged.description, &self.description);
        merge(&mut merged.email, &self.email);
        merge(&mut merged.phone, &self.phone);

        match merged.address.as_mut() {
            Some(address) => self.address.apply(address),
            None => merged.address = self.address.to_address(),
        }

        merged
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn merge(field: &mut Option<String>, update: &Option<String>) {
    if let Some(value) = supplied(update) {
        *field = Some(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedding() -> Anniversary {
        let mut a = Anniversary::new(
            "A & B",
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            "Wedding",
        );
        a.email = Some("ab@example.com".to_string());
        a
    }

    #[test]
    fn empty_values_keep_current_fields() {
        let update = AnniversaryUpdate {
            names: Some(String::new()),
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(update.is_empty());
        assert_eq!(update.apply_to(&wedding()), wedding());
    }

    #[test]
    fn supplied_values_overwrite() {
        let update = AnniversaryUpdate {
            names: Some("C & D".to_string()),
            anniversary_date: NaiveDate::from_ymd_opt(2020, 1, 5),
            phone: Some("555-123-4567".to_string()),
            ..Default::default()
        };
        let merged = update.apply_to(&wedding());
        assert_eq!(merged.names, "C & D");
        assert_eq!(merged.anniversary_date, NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
        assert_eq!(merged.phone.as_deref(), Some("555-123-4567"));
        assert_eq!(merged.anniversary_type, "Wedding");
        assert_eq!(merged.email.as_deref(), Some("ab@example.com"));
    }

    #[test]
    fn address_created_with_only_supplied_fields() {
        let update = AnniversaryUpdate {
            address: AddressUpdate {
                municipality: Some("Ottawa".to_string()),
                province: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = update.apply_to(&wedding());
        assert_eq!(
            merged.address,
            Some(Address {
                municipality: Some("Ottawa".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn blank_address_update_does_not_create_address() {
        let update = AnniversaryUpdate {
            address: AddressUpdate {
                street_address: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(update.apply_to(&wedding()).address, None);
    }

    #[test]
    fn existing_address_is_merged_field_by_field() {
        let mut current = wedding();
        current.address = Some(Address {
            street_address: Some("1 Main St".to_string()),
            province: Some("ON".to_string()),
            ..Default::default()
        });
        let update = AnniversaryUpdate {
            address: AddressUpdate {
                province: Some("QC".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let address = update.apply_to(&current).address.unwrap();
        assert_eq!(address.street_address.as_deref(), Some("1 Main St"));
        assert_eq!(address.province.as_deref(), Some("QC"));
    }
}
