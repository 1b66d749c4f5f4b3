use crate::domain::model::{Destination, RecordSet};
use crate::utils::error::{Result, SyncError};

/// One named slice of the store list, ready for serialization.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub destination: Option<&'a Destination>,
    pub records: RecordSet,
}

/// Records `destination` should receive, judged against the full source set.
///
/// An empty allow-list keeps everything. Otherwise a record is kept when its
/// `country_column` value is listed; a record without that column never matches.
pub fn filter_for_destination(
    records: &RecordSet,
    destination: &Destination,
    country_column: &str,
) -> RecordSet {
    if destination.serves_all_countries() {
        return records.clone();
    }

    records.filtered(|record| {
        record
            .get(country_column)
            .is_some_and(|country| destination.countries.iter().any(|c| c == country))
    })
}

/// Fails when a country filter is configured but the sheet has no country column.
pub fn ensure_country_column(
    records: &RecordSet,
    destinations: &[Destination],
    country_column: &str,
) -> Result<()> {
    let filtering = destinations.iter().any(|d| !d.serves_all_countries());
    if filtering && !records.has_column(country_column) {
        return Err(SyncError::MissingColumnError {
            column: country_column.to_string(),
        });
    }
    Ok(())
}

/// Per-destination slices in declaration order, followed by the unfiltered set
/// (`destination: None`).
pub fn partition_all<'a>(
    records: &RecordSet,
    destinations: &'a [Destination],
    country_column: &str,
) -> Vec<Partition<'a>> {
    destinations
        .iter()
        .map(|destination| Partition {
            destination: Some(destination),
            records: filter_for_destination(records, destination, country_column),
        })
        .chain(std::iter::once(Partition {
            destination: None,
            records: records.clone(),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;

    fn stores() -> RecordSet {
        let columns = vec!["Company".to_string(), "Country".to_string()];
        let rows = [("Acme", "DK"), ("Beta", "NO"), ("Gamma", "SE"), ("Delta", "DK")];
        let records = rows
            .iter()
            .map(|(company, country)| -> Record {
                [("Company", *company), ("Country", *country)].into_iter().collect()
            })
            .collect();
        RecordSet::new(columns, records)
    }

    fn companies(set: &RecordSet) -> Vec<&str> {
        set.iter().filter_map(|r| r.get("Company")).collect()
    }

    #[test]
    fn test_empty_allow_list_is_identity() {
        let all = stores();
        let destination = Destination::new("int", Vec::<String>::new(), "EUR", "en");
        assert_eq!(filter_for_destination(&all, &destination, "Country"), all);
    }

    #[test]
    fn test_allow_list_keeps_listed_countries_in_order() {
        let destination = Destination::new("nordic", ["DK", "SE"], "DKK", "da");
        let filtered = filter_for_destination(&stores(), &destination, "Country");
        assert_eq!(companies(&filtered), vec!["Acme", "Gamma", "Delta"]);
    }

    #[test]
    fn test_record_without_country_never_matches() {
        let set = RecordSet::new(
            vec!["Company".to_string()],
            vec![[("Company", "Nowhere")].into_iter().collect()],
        );
        let destination = Destination::new("dk", ["DK"], "DKK", "da");
        assert!(filter_for_destination(&set, &destination, "Country").is_empty());
    }

    #[test]
    fn test_match_is_exact() {
        let set = RecordSet::new(
            vec!["Company".to_string(), "Country".to_string()],
            vec![[("Company", "Lower"), ("Country", "dk")].into_iter().collect()],
        );
        let destination = Destination::new("dk", ["DK"], "DKK", "da");
        assert!(filter_for_destination(&set, &destination, "Country").is_empty());
    }

    #[test]
    fn test_partitions_overlap_and_end_with_combined_set() {
        let destinations = vec![
            Destination::new("dk", ["DK"], "DKK", "da"),
            Destination::new("nordic", ["DK", "NO", "SE"], "EUR", "en"),
            Destination::new("fi", ["FI"], "EUR", "fi"),
        ];
        let partitions = partition_all(&stores(), &destinations, "Country");

        assert_eq!(partitions.len(), 4);
        assert_eq!(companies(&partitions[0].records), vec!["Acme", "Delta"]);
        assert_eq!(partitions[1].records.len(), 4);
        assert!(partitions[2].records.is_empty());
        assert!(partitions[3].destination.is_none());
        assert_eq!(partitions[3].records, stores());
    }

    #[test]
    fn test_ensure_country_column() {
        let no_country = RecordSet::new(vec!["Company".to_string()], Vec::new());
        let open = vec![Destination::new("int", Vec::<String>::new(), "EUR", "en")];
        let filtered = vec![Destination::new("dk", ["DK"], "DKK", "da")];

        assert!(ensure_country_column(&no_country, &open, "Country").is_ok());
        assert!(matches!(
            ensure_country_column(&no_country, &filtered, "Country"),
            Err(SyncError::MissingColumnError { column }) if column == "Country"
        ));
        assert!(ensure_country_column(&stores(), &filtered, "Country").is_ok());
    }
}
