use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skyfare_shared::models::Ticket;

/// Ordering applied after filtering. `Default` preserves fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" | "" => Some(Self::Default),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            _ => None,
        }
    }
}

/// Current search inputs. Empty text fields and unset options are no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub date: Option<NaiveDate>,
    pub airline: Option<String>,
    pub sort: SortMode,
}

/// Narrow and order the full ticket list for display.
///
/// Pure and total over its inputs. Always starts from the unfiltered list,
/// so changing any input recomputes the result from source rather than
/// stacking filters across runs. Sorting is stable: equal prices keep their
/// fetch order.
pub fn apply(tickets: &[Ticket], query: &SearchQuery) -> Vec<Ticket> {
    let origin = query.origin.trim().to_lowercase();
    let destination = query.destination.trim().to_lowercase();

    let mut results: Vec<Ticket> = tickets
        .iter()
        .filter(|t| origin.is_empty() || t.origin_city.to_lowercase().contains(&origin))
        .filter(|t| {
            destination.is_empty() || t.destination_city.to_lowercase().contains(&destination)
        })
        .filter(|t| match query.date {
            Some(date) => t.departure_at.date_naive() == date,
            None => true,
        })
        .filter(|t| match &query.airline {
            Some(airline) => &t.airline == airline,
            None => true,
        })
        .cloned()
        .collect();

    match query.sort {
        SortMode::Default => {}
        SortMode::PriceAsc => results.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => results.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    results
}

/// Airlines present in the list, first-seen order, for the filter dropdown.
pub fn unique_airlines(tickets: &[Ticket]) -> Vec<String> {
    let mut airlines: Vec<String> = Vec::new();
    for ticket in tickets {
        if !airlines.contains(&ticket.airline) {
            airlines.push(ticket.airline.clone());
        }
    }
    airlines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ticket(id: &str, origin: &str, destination: &str, airline: &str, price: f64) -> Ticket {
        Ticket {
            id: id.to_string(),
            flight_number: format!("SF-{id}"),
            origin_city: origin.to_string(),
            origin_airport: "XXX".to_string(),
            destination_city: destination.to_string(),
            destination_airport: "YYY".to_string(),
            departure_at: Utc.with_ymd_and_hms(2025, 7, 1, 10, 30, 0).unwrap(),
            airline: airline.to_string(),
            price,
            currency: "EUR".to_string(),
        }
    }

    fn fixtures() -> Vec<Ticket> {
        vec![
            ticket("1", "Moscow", "Paris", "AirFrance", 220.0),
            ticket("2", "Amsterdam", "Istanbul", "Turkish", 150.0),
            ticket("3", "Moscow", "Dubai", "Emirates", 300.0),
            ticket("4", "New York", "Paris", "Delta", 150.0),
        ]
    }

    #[test]
    fn empty_query_returns_input_unchanged() {
        let tickets = fixtures();
        let result = apply(&tickets, &SearchQuery::default());
        assert_eq!(result, tickets);
    }

    #[test]
    fn origin_filter_is_case_insensitive_substring() {
        let tickets = fixtures();
        let query = SearchQuery {
            origin: "  mOsC ".to_string(),
            ..Default::default()
        };
        let result = apply(&tickets, &query);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.origin_city == "Moscow"));
    }

    #[test]
    fn destination_filter_matches_substring() {
        let tickets = fixtures();
        let query = SearchQuery {
            destination: "par".to_string(),
            ..Default::default()
        };
        let result = apply(&tickets, &query);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.destination_city == "Paris"));
    }

    #[test]
    fn date_filter_compares_calendar_day_only() {
        let mut tickets = fixtures();
        tickets[0].departure_at = Utc.with_ymd_and_hms(2025, 7, 2, 0, 15, 0).unwrap();

        let query = SearchQuery {
            date: Some(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()),
            ..Default::default()
        };
        let result = apply(&tickets, &query);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|t| t.id != "1"));
    }

    #[test]
    fn airline_filter_is_exact() {
        let tickets = fixtures();
        let query = SearchQuery {
            airline: Some("Turkish".to_string()),
            ..Default::default()
        };
        let result = apply(&tickets, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn price_sorts_are_reverses_of_each_other() {
        let tickets = fixtures();
        let asc = apply(
            &tickets,
            &SearchQuery {
                sort: SortMode::PriceAsc,
                ..Default::default()
            },
        );
        let desc = apply(
            &tickets,
            &SearchQuery {
                sort: SortMode::PriceDesc,
                ..Default::default()
            },
        );

        let mut reversed = desc.clone();
        reversed.reverse();
        let asc_prices: Vec<f64> = asc.iter().map(|t| t.price).collect();
        let rev_prices: Vec<f64> = reversed.iter().map(|t| t.price).collect();
        assert_eq!(asc_prices, rev_prices);
    }

    #[test]
    fn equal_prices_keep_fetch_order() {
        let tickets = fixtures();
        let asc = apply(
            &tickets,
            &SearchQuery {
                sort: SortMode::PriceAsc,
                ..Default::default()
            },
        );
        // Tickets 2 and 4 share a price; 2 was fetched first.
        let ties: Vec<&str> = asc
            .iter()
            .filter(|t| t.price == 150.0)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ties, vec!["2", "4"]);
    }

    #[test]
    fn impossible_query_yields_empty_result() {
        let tickets = fixtures();
        let query = SearchQuery {
            origin: "Atlantis".to_string(),
            ..Default::default()
        };
        assert!(apply(&tickets, &query).is_empty());
    }

    #[test]
    fn unique_airlines_deduplicates_in_first_seen_order() {
        let mut tickets = fixtures();
        tickets.push(ticket("5", "Moscow", "Paris", "Turkish", 90.0));
        assert_eq!(
            unique_airlines(&tickets),
            vec!["AirFrance", "Turkish", "Emirates", "Delta"]
        );
    }

    #[test]
    fn sort_mode_parses_wire_names() {
        assert_eq!(SortMode::parse("price_asc"), Some(SortMode::PriceAsc));
        assert_eq!(SortMode::parse("price_desc"), Some(SortMode::PriceDesc));
        assert_eq!(SortMode::parse(""), Some(SortMode::Default));
        assert_eq!(SortMode::parse("cheapest"), None);
    }
}
