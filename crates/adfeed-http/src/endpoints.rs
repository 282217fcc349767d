//! Request types for the listing endpoint.

use serde::Serialize;

/// Query parameters of the listing request.
#[derive(Debug, Serialize)]
pub struct ListAdsQuery<'a> {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<&'a str>,
}

/// JSON body of the listing request.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoSearchBody {
    #[serde(rename = "type")]
    pub kind: &'static [&'static str],
    /// Search radius in metres.
    pub distance: u32,
    pub donation_state: &'static [&'static str],
    pub latitude: f64,
    pub universe: &'static [&'static str],
    pub longitude: f64,
}

/// Open or reserved object donations within 10 km of central Bordeaux.
pub const DONATION_SEARCH: GeoSearchBody = GeoSearchBody {
    kind: &["donation"],
    distance: 10_000,
    donation_state: &["open", "reserved"],
    latitude: 44.838_069_1,
    universe: &["object"],
    longitude: -0.577_767_8,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_matches_backend_contract() {
        let body = serde_json::to_value(DONATION_SEARCH).unwrap();
        assert_eq!(
            body,
            json!({
                "type": ["donation"],
                "distance": 10000,
                "donationState": ["open", "reserved"],
                "latitude": 44.8380691,
                "universe": ["object"],
                "longitude": -0.5777678
            })
        );
    }

    #[test]
    fn absent_cursors_are_omitted() {
        let query = ListAdsQuery {
            limit: 26,
            after: None,
            before: None,
        };
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"limit": 26}));

        let query = ListAdsQuery {
            limit: 26,
            after: Some("cursor2"),
            before: None,
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"limit": 26, "after": "cursor2"})
        );
    }
}
