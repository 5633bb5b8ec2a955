//! Plain-text views written to any `Write` sink.

use std::io::{self, Write};

use tpl_core::{BranchDetail, Event, MapRegion, Nearest, RankedBranch, format_distance};
use tpl_data::SkippedRecord;

pub(crate) const NO_LIBRARIES: &str = "No Libraries Available";
pub(crate) const LOCATION_UNAVAILABLE: &str =
    "Location unavailable: set --latitude and --longitude to find the nearest library";

/// One line per branch; `query` selects the empty-result message.
pub(crate) fn write_list(
    writer: &mut dyn Write,
    rows: &[RankedBranch<'_>],
    query: &str,
    loaded_any: bool,
) -> io::Result<()> {
    if rows.is_empty() {
        return if loaded_any && !query.is_empty() {
            writeln!(writer, "No libraries match \"{query}\"")
        } else {
            writeln!(writer, "{NO_LIBRARIES}")
        };
    }
    for row in rows {
        let branch = row.branch;
        write!(writer, "{}: {}", branch.branch_name, branch.address)?;
        match row.distance_label() {
            Some(label) => writeln!(writer, " ({label})")?,
            None => writeln!(writer)?,
        }
    }
    Ok(())
}

/// Branch fields followed by the visits and events sections.
///
/// A section whose collection failed to load is shown as unavailable.
pub(crate) fn write_detail(
    writer: &mut dyn Write,
    detail: &BranchDetail<'_>,
    distance_meters: Option<f64>,
    visits_loaded: bool,
    events_loaded: bool,
) -> io::Result<()> {
    let branch = detail.branch;
    writeln!(writer, "{}", branch.branch_name)?;
    writeln!(writer, "Address: {}, {}", branch.address, branch.postal_code)?;
    writeln!(writer, "Telephone: {}", branch.telephone)?;
    writeln!(writer, "Website: {}", branch.website)?;
    writeln!(writer, "Ward: {}", branch.ward_name)?;
    if let Some(neighbourhood) = &branch.neighbourhood_name {
        writeln!(writer, "Neighbourhood: {neighbourhood}")?;
    }
    writeln!(writer, "Square Footage: {}", branch.square_footage)?;
    writeln!(writer, "Public Parking: {}", branch.public_parking)?;
    if let Some(workstations) = branch.workstations {
        writeln!(writer, "Workstations: {workstations}")?;
    }
    let services = branch.offered_services();
    if !services.is_empty() {
        let labels: Vec<&str> = services.iter().map(|service| service.label()).collect();
        writeln!(writer, "Services: {}", labels.join(", "))?;
    }
    if let Some(meters) = distance_meters {
        writeln!(writer, "Distance: {}", format_distance(meters))?;
    }

    writeln!(writer)?;
    writeln!(writer, "Annual Visits")?;
    if !visits_loaded {
        writeln!(writer, "Visit data unavailable")?;
    } else if detail.visits.is_empty() {
        writeln!(writer, "No visit data")?;
    }
    for record in &detail.visits {
        writeln!(writer, "{}: {} visits", record.year, record.visits)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Events")?;
    if !events_loaded {
        writeln!(writer, "Event data unavailable")?;
    } else if detail.events.is_empty() {
        writeln!(writer, "No upcoming events")?;
    }
    for event in &detail.events {
        write_event(writer, event)?;
    }
    Ok(())
}

fn write_event(writer: &mut dyn Write, event: &Event) -> io::Result<()> {
    writeln!(writer, "{}", event.title)?;
    writeln!(writer, "  Dates: {} to {}", event.start_date, event.end_date)?;
    if let Some(start) = &event.start_time {
        writeln!(writer, "  Time: {start}")?;
    }
    if let Some(end) = &event.end_time {
        writeln!(writer, "  End Time: {end}")?;
    }
    if let Some(location) = &event.location {
        writeln!(writer, "  Location: {location}")?;
    }
    if !event.description.trim().is_empty() {
        writeln!(writer, "  {}", event.description.trim())?;
    }
    Ok(())
}

/// The nearest-branch overlay.
pub(crate) fn write_nearest(writer: &mut dyn Write, nearest: Option<&Nearest<'_>>) -> io::Result<()> {
    match nearest {
        Some(found) => writeln!(
            writer,
            "Nearest Library: {} ({})",
            found.branch.branch_name,
            format_distance(found.distance_meters)
        ),
        None => writeln!(writer, "{LOCATION_UNAVAILABLE}"),
    }
}

/// Centre and span of a map framing.
pub(crate) fn write_region(writer: &mut dyn Write, label: &str, region: &MapRegion) -> io::Result<()> {
    writeln!(
        writer,
        "{label}: center {:.4}, {:.4}; span {:.4} x {:.4} degrees",
        region.center.y, region.center.x, region.span.lat_delta, region.span.lon_delta
    )
}

/// One summary line per resource that had records dropped while decoding.
pub(crate) fn write_skipped(writer: &mut dyn Write, skipped: &[SkippedRecord]) -> io::Result<()> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in skipped {
        match counts
            .iter_mut()
            .find(|(resource, _)| *resource == record.resource)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((&record.resource, 1)),
        }
    }
    for (resource, count) in counts {
        let noun = if count == 1 { "record" } else { "records" };
        writeln!(writer, "Skipped {count} malformed {noun} in {resource}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tpl_core::{
        Branch, Catalogue, FixedLocation, NoLocation,
        test_support::{branch_at, event_on, visit},
    };

    fn render(write: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap_or_else(|err| panic!("write to buffer: {err}"));
        String::from_utf8(buffer).unwrap_or_else(|err| panic!("utf-8 output: {err}"))
    }

    fn albion() -> Branch {
        let mut branch = branch_at(1, "AB", "Albion", 43.7400, -79.5847);
        branch.neighbourhood_name = Some("Mount Olive-Silverstone-Jamestown".into());
        branch.services.kids_stop = Some(1);
        branch.services.youth_hub = Some(0);
        branch.services.clc = Some(2);
        branch
    }

    #[rstest]
    #[case("", false, "No Libraries Available\n")]
    #[case("york", false, "No Libraries Available\n")]
    #[case(" york ", true, "No libraries match \" york \"\n")]
    #[case("", true, "No Libraries Available\n")]
    fn empty_lists_explain_themselves(
        #[case] query: &str,
        #[case] loaded_any: bool,
        #[case] expected: &str,
    ) {
        let out = render(|w| write_list(w, &[], query, loaded_any));
        assert_eq!(out, expected);
    }

    #[rstest]
    fn list_rows_show_distance_when_known() {
        let catalogue = Catalogue::new(vec![albion()]);
        let here = FixedLocation::new(43.7400, -79.5847);
        let with = render(|w| write_list(w, &catalogue.search("", &here), "", true));
        assert_eq!(with, "Albion: 1 Test Street (0.00 km)\n");
        let without = render(|w| write_list(w, &catalogue.search("", &NoLocation), "", true));
        assert_eq!(without, "Albion: 1 Test Street\n");
    }

    #[rstest]
    fn detail_lists_services_visits_and_events() {
        let branch = albion();
        let visits = vec![visit(1, "AB", 2022, "47000"), visit(2, "AB", 2023, "52000")];
        let mut tea = event_on(3, "Albion", "2025-09-05");
        tea.title = "Tea & Entertainment".into();
        tea.end_date = "2025-12-19".into();
        tea.start_time = Some("13:30".into());
        tea.location = Some("Program Room".into());
        tea.description = "Weekly social afternoon for older adults.".into();
        let events = vec![tea];
        let detail = BranchDetail::assemble(&branch, &visits, &events);

        let out = render(|w| write_detail(w, &detail, Some(3_421.7), true, true));
        assert!(out.starts_with("Albion\n"));
        assert!(out.contains("Ward: Spadina-Fort York\nNeighbourhood: Mount Olive-Silverstone-Jamestown\n"));
        assert!(out.contains("Services: KidsStop, CLC\n"));
        assert!(out.contains("Distance: 3.42 km\n"));
        assert!(out.contains("2023: 52000 visits\n2022: 47000 visits\n"));
        assert!(out.contains(
            "Tea & Entertainment\n  Dates: 2025-09-05 to 2025-12-19\n  Time: 13:30\n  \
             Location: Program Room\n  Weekly social afternoon for older adults.\n"
        ));
        assert!(!out.contains("End Time"));
    }

    #[rstest]
    fn detail_marks_failed_sections() {
        let branch = branch_at(2, "FY", "Fort York", 43.6395, -79.4022);
        let detail = BranchDetail::assemble(&branch, &[], &[]);
        let out = render(|w| write_detail(w, &detail, None, false, true));
        assert!(out.contains("Visit data unavailable\n"));
        assert!(out.contains("No upcoming events\n"));
        assert!(!out.contains("Services:"));
        assert!(!out.contains("Neighbourhood:"));
        assert!(!out.contains("Distance:"));
    }

    #[rstest]
    fn nearest_overlay_names_branch_and_distance() {
        let branch = albion();
        let nearest = Nearest {
            branch: &branch,
            distance_meters: 1_250.0,
        };
        let out = render(|w| write_nearest(w, Some(&nearest)));
        assert_eq!(out, "Nearest Library: Albion (1.25 km)\n");
        let none = render(|w| write_nearest(w, None));
        assert_eq!(none, format!("{LOCATION_UNAVAILABLE}\n"));
    }

    #[rstest]
    fn region_prints_latitude_first() {
        let out = render(|w| write_region(w, "Map", &MapRegion::FALLBACK));
        assert_eq!(
            out,
            "Map: center 43.7000, -79.4000; span 0.1000 x 0.1000 degrees\n"
        );
    }

    fn skipped(resource: &str, index: usize) -> SkippedRecord {
        SkippedRecord {
            resource: resource.to_owned(),
            index,
            reason: "missing field".to_owned(),
        }
    }

    #[rstest]
    fn skipped_records_are_summarised_per_resource() {
        let records = vec![
            skipped("branches.json", 2),
            skipped("visits.json", 0),
            skipped("branches.json", 5),
        ];
        let out = render(|w| write_skipped(w, &records));
        assert_eq!(
            out,
            "Skipped 2 malformed records in branches.json\n\
             Skipped 1 malformed record in visits.json\n"
        );
        assert_eq!(render(|w| write_skipped(w, &[])), "");
    }
}
