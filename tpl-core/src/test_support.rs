//! Record builders shared by unit, behaviour and property tests.
//!
//! Only the fields the query and ranking operations read are meaningful;
//! the rest are filled with plausible placeholders.

use crate::{Branch, Event, VisitRecord, branch::BranchServices};

/// Branch with the given identity and position and no services.
pub fn branch_at(id: u64, code: &str, name: &str, latitude: f64, longitude: f64) -> Branch {
    Branch {
        id,
        branch_code: code.to_owned(),
        branch_name: name.to_owned(),
        address: format!("{id} Test Street"),
        postal_code: "M5V 0A1".to_owned(),
        website: format!("https://www.torontopubliclibrary.ca/{}", code.to_lowercase()),
        telephone: "416-393-7131".to_owned(),
        square_footage: "10000".to_owned(),
        public_parking: "0".to_owned(),
        service_tier: "NL".to_owned(),
        latitude,
        longitude,
        services: BranchServices::default(),
        workstations: None,
        neighbourhood_no: None,
        neighbourhood_name: None,
        tplnia: None,
        ward_no: None,
        ward_name: "Spadina-Fort York".to_owned(),
        present_site_year: None,
    }
}

/// Visit record for `branch_code` in `year`.
pub fn visit(id: u64, branch_code: &str, year: i32, visits: &str) -> VisitRecord {
    VisitRecord {
        id,
        year,
        branch_code: branch_code.to_owned(),
        visits: visits.to_owned(),
    }
}

/// Single-day event at `library` starting on `start_date`.
pub fn event_on(id: u64, library: &str, start_date: &str) -> Event {
    Event {
        id,
        title: format!("Event {id}"),
        start_date: start_date.to_owned(),
        end_date: start_date.to_owned(),
        start_time: None,
        end_time: None,
        library: library.to_owned(),
        location: None,
        description: String::new(),
    }
}
