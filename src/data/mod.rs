//! Core data models for the MGNREGA dashboard
//!
//! This module contains the record and district types shared across the
//! application, plus the data.gov.in client and the built-in sample data.

pub mod client;
pub mod sample;

pub use client::{ApiError, DataClient, HealthStatus, RecordFilter, DEFAULT_LIMIT};
pub use sample::sample_response;

use serde::{Deserialize, Serialize};

/// One monthly performance snapshot for one district, as returned by the
/// data.gov.in MGNREGA resource.
///
/// The upstream dataset reports every numeric figure as a string and may
/// omit or blank individual fields for some months. Every field therefore
/// deserializes with a default so one sparse record never sinks an entire
/// batch; values are parsed through [`crate::metrics::parse_or_zero`] at
/// the point of use. Field names mirror the upstream column names exactly,
/// including the upstream's own spelling of
/// `percentage_payments_gererated_within_15_days`.
///
/// Identity: (district_code, fin_year, month).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Financial year in fixed-width `YYYY-YYYY` form, e.g. "2024-2025"
    #[serde(default)]
    pub fin_year: String,
    /// Three-letter month abbreviation, "Jan" through "Dec"
    #[serde(default)]
    pub month: String,
    /// Numeric state code assigned by the scheme
    #[serde(default)]
    pub state_code: String,
    /// State name, upper-case as upstream reports it
    #[serde(default)]
    pub state_name: String,
    /// Numeric district code assigned by the scheme
    #[serde(default)]
    pub district_code: String,
    /// District name, upper-case as upstream reports it
    #[serde(default)]
    pub district_name: String,

    // Employment and labour-budget figures
    #[serde(rename = "Approved_Labour_Budget", default)]
    pub approved_labour_budget: String,
    #[serde(rename = "Persondays_of_Central_Liability_so_far", default)]
    pub persondays_of_central_liability_so_far: String,
    #[serde(rename = "Average_days_of_employment_provided_per_Household", default)]
    pub average_days_of_employment_per_household: String,
    #[serde(rename = "Average_Wage_rate_per_day_per_person", default)]
    pub average_wage_rate_per_day_per_person: String,
    #[serde(rename = "Total_Households_Worked", default)]
    pub total_households_worked: String,
    #[serde(rename = "Total_Individuals_Worked", default)]
    pub total_individuals_worked: String,
    #[serde(
        rename = "Total_No_of_HHs_completed_100_Days_of_Wage_Employment",
        default
    )]
    pub households_completed_100_days: String,

    // Job card and worker registries
    #[serde(rename = "Total_No_of_Active_Job_Cards", default)]
    pub total_active_job_cards: String,
    #[serde(rename = "Total_No_of_JobCards_issued", default)]
    pub total_job_cards_issued: String,
    #[serde(rename = "Total_No_of_Active_Workers", default)]
    pub total_active_workers: String,
    #[serde(rename = "Total_No_of_Workers", default)]
    pub total_workers: String,

    // Social-category participation
    #[serde(rename = "SC_persondays", default)]
    pub sc_persondays: String,
    #[serde(rename = "SC_workers_against_active_workers", default)]
    pub sc_workers_against_active_workers: String,
    #[serde(rename = "ST_persondays", default)]
    pub st_persondays: String,
    #[serde(rename = "ST_workers_against_active_workers", default)]
    pub st_workers_against_active_workers: String,
    #[serde(rename = "Women_Persondays", default)]
    pub women_persondays: String,
    #[serde(rename = "Differently_abled_persons_worked", default)]
    pub differently_abled_persons_worked: String,

    // Works
    #[serde(rename = "Number_of_Completed_Works", default)]
    pub number_of_completed_works: String,
    #[serde(rename = "Number_of_Ongoing_Works", default)]
    pub number_of_ongoing_works: String,
    #[serde(rename = "Total_No_of_Works_Takenup", default)]
    pub total_works_taken_up: String,
    #[serde(rename = "percent_of_Category_B_Works", default)]
    pub percent_category_b_works: String,
    #[serde(rename = "percent_of_NRM_Expenditure", default)]
    pub percent_nrm_expenditure: String,
    #[serde(
        rename = "percent_of_Expenditure_on_Agriculture_Allied_Works",
        default
    )]
    pub percent_expenditure_agriculture: String,

    // Financials (rupees in lakh unless upstream says otherwise)
    #[serde(rename = "Total_Exp", default)]
    pub total_expenditure: String,
    #[serde(rename = "Wages", default)]
    pub wages: String,
    #[serde(rename = "Material_and_skilled_Wages", default)]
    pub material_and_skilled_wages: String,
    #[serde(rename = "Total_Adm_Expenditure", default)]
    pub total_adm_expenditure: String,
    #[serde(rename = "Number_of_GPs_with_NIL_exp", default)]
    pub gps_with_nil_expenditure: String,
    #[serde(rename = "percentage_payments_gererated_within_15_days", default)]
    pub percentage_payments_within_15_days: String,

    #[serde(rename = "Remarks", default)]
    pub remarks: String,
}

/// A (state, district) identity derived from observed records.
///
/// Districts have no independent lifecycle; the set is recomputed from the
/// latest fetched batch via [`crate::metrics::unique_districts`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct District {
    pub state_name: String,
    pub district_name: String,
    pub state_code: String,
    pub district_code: String,
}

impl District {
    /// Builds the identity tuple from a record, taking that record's codes.
    pub fn from_record(record: &Record) -> Self {
        Self {
            state_name: record.state_name.clone(),
            district_name: record.district_name.clone(),
            state_code: record.state_code.clone(),
            district_code: record.district_code.clone(),
        }
    }
}

/// The upstream response envelope.
///
/// Only `records` is interpreted; the metadata fields ride along untouched
/// so a cached response can be returned exactly as received. `records`
/// carries no default on purpose: a body without it is a format error the
/// client must surface, not an empty dataset. Unknown envelope fields
/// (organisation arrays, bucket descriptors) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub index_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub updated_date: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub count: u64,
    /// Upstream quirk: `limit` and `offset` come back as strings.
    #[serde(default)]
    pub limit: String,
    #[serde(default)]
    pub offset: String,
    pub records: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trimmed but shape-faithful upstream response body.
    const RESPONSE_FIXTURE: &str = r#"{
        "index_name": "ee03643a-ee4c-48c2-ac30-9f2ff26ab722",
        "title": "District-wise MGNREGA Data at a Glance",
        "desc": "District-wise MGNREGA Data at a Glance",
        "org_type": "Central",
        "org": ["Ministry of Rural Development"],
        "source": "data.gov.in",
        "version": "2.2.0",
        "status": "ok",
        "updated_date": "2025-10-28T05:02:04Z",
        "total": 2,
        "count": 2,
        "limit": "10",
        "offset": "0",
        "records": [
            {
                "fin_year": "2024-2025",
                "month": "Dec",
                "state_code": "17",
                "state_name": "MADHYA PRADESH",
                "district_code": "1752",
                "district_name": "BHOPAL",
                "Approved_Labour_Budget": "1078289",
                "Average_Wage_rate_per_day_per_person": "245.41",
                "Average_days_of_employment_provided_per_Household": "43",
                "Number_of_Completed_Works": "2640",
                "Total_Exp": "3884.10",
                "Total_Individuals_Worked": "24607",
                "Women_Persondays": "288446",
                "percentage_payments_gererated_within_15_days": "99.92",
                "Remarks": "NA"
            },
            {
                "fin_year": "2024-2025",
                "month": "Nov",
                "state_code": "17",
                "state_name": "MADHYA PRADESH",
                "district_code": "1752",
                "district_name": "BHOPAL"
            }
        ]
    }"#;

    #[test]
    fn test_response_parses_with_renamed_fields() {
        let response: ApiResponse = serde_json::from_str(RESPONSE_FIXTURE).unwrap();

        assert_eq!(response.total, 2);
        assert_eq!(response.limit, "10");
        assert_eq!(response.records.len(), 2);

        let first = &response.records[0];
        assert_eq!(first.fin_year, "2024-2025");
        assert_eq!(first.month, "Dec");
        assert_eq!(first.district_name, "BHOPAL");
        assert_eq!(first.approved_labour_budget, "1078289");
        assert_eq!(first.average_wage_rate_per_day_per_person, "245.41");
        assert_eq!(first.percentage_payments_within_15_days, "99.92");
    }

    #[test]
    fn test_sparse_record_defaults_to_empty_fields() {
        let response: ApiResponse = serde_json::from_str(RESPONSE_FIXTURE).unwrap();

        // The second record carries identity fields only; everything else
        // must come back as the empty string rather than failing the parse.
        let sparse = &response.records[1];
        assert_eq!(sparse.month, "Nov");
        assert_eq!(sparse.approved_labour_budget, "");
        assert_eq!(sparse.wages, "");
        assert_eq!(sparse.remarks, "");
    }

    #[test]
    fn test_missing_records_field_is_a_parse_error() {
        let body = r#"{"title": "District-wise MGNREGA Data at a Glance", "total": 0}"#;
        let result: Result<ApiResponse, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_array_records_field_is_a_parse_error() {
        let body = r#"{"records": "not a list"}"#;
        let result: Result<ApiResponse, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_district_from_record_takes_codes() {
        let record = Record {
            fin_year: "2023-2024".to_string(),
            month: "Jan".to_string(),
            state_code: "27".to_string(),
            state_name: "KARNATAKA".to_string(),
            district_code: "2734".to_string(),
            district_name: "MYSURU".to_string(),
            ..Record::default()
        };

        let district = District::from_record(&record);
        assert_eq!(district.state_name, "KARNATAKA");
        assert_eq!(district.district_name, "MYSURU");
        assert_eq!(district.state_code, "27");
        assert_eq!(district.district_code, "2734");
    }

    #[test]
    fn test_response_roundtrips_through_json() {
        let response: ApiResponse = serde_json::from_str(RESPONSE_FIXTURE).unwrap();
        let json = serde_json::to_string(&response).unwrap();
        let reparsed: ApiResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, reparsed);
    }
}
