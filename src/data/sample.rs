//! Built-in sample dataset
//!
//! A small, self-consistent slice of district data in the upstream wire
//! shape, used by demo mode and anywhere a populated response is needed
//! without network access. Figures follow the ranges the public dataset
//! reports for mid-sized districts.

use crate::data::{ApiResponse, Record};

fn whole(value: f64) -> String {
    format!("{value:.0}")
}

/// Rupee-lakh amounts keep two decimals, as upstream reports them.
fn lakh(value: f64) -> String {
    format!("{value:.2}")
}

/// One monthly record for a district, with counts and amounts scaled from
/// a common baseline so every record stays internally consistent.
fn district_month(
    fin_year: &str,
    month: &str,
    state: (&str, &str),
    district: (&str, &str),
    scale: f64,
    wage_rate: f64,
    timely_pct: f64,
) -> Record {
    let (state_code, state_name) = state;
    let (district_code, district_name) = district;

    Record {
        fin_year: fin_year.to_string(),
        month: month.to_string(),
        state_code: state_code.to_string(),
        state_name: state_name.to_string(),
        district_code: district_code.to_string(),
        district_name: district_name.to_string(),

        approved_labour_budget: whole(1_078_289.0 * scale),
        persondays_of_central_liability_so_far: whole(741_282.0 * scale),
        average_days_of_employment_per_household: whole(43.0 * scale.sqrt()),
        average_wage_rate_per_day_per_person: lakh(wage_rate),
        total_households_worked: whole(17_219.0 * scale),
        total_individuals_worked: whole(24_607.0 * scale),
        households_completed_100_days: whole(11.0 * scale),

        total_active_job_cards: whole(37_337.0 * scale),
        total_job_cards_issued: whole(46_280.0 * scale),
        total_active_workers: whole(63_430.0 * scale),
        total_workers: whole(78_026.0 * scale),

        sc_persondays: whole(82_041.0 * scale),
        sc_workers_against_active_workers: whole(7_639.0 * scale),
        st_persondays: whole(65_379.0 * scale),
        st_workers_against_active_workers: whole(7_496.0 * scale),
        women_persondays: whole(288_446.0 * scale),
        differently_abled_persons_worked: whole(118.0 * scale),

        number_of_completed_works: whole(2_640.0 * scale),
        number_of_ongoing_works: whole(3_943.0 * scale),
        total_works_taken_up: whole(6_583.0 * scale),
        percent_category_b_works: "63".to_string(),
        percent_nrm_expenditure: "54.94".to_string(),
        percent_expenditure_agriculture: "36.53".to_string(),

        total_expenditure: lakh(3_884.10 * scale),
        wages: lakh(1_819.19 * scale),
        material_and_skilled_wages: lakh(1_786.85 * scale),
        total_adm_expenditure: lakh(278.06 * scale),
        gps_with_nil_expenditure: "0".to_string(),
        percentage_payments_within_15_days: lakh(timely_pct),

        remarks: "NA".to_string(),
    }
}

/// The demo response: five districts across two states, with enough
/// monthly history on the first district to exercise trends at both
/// granularities.
pub fn sample_response() -> ApiResponse {
    const MP: (&str, &str) = ("17", "MADHYA PRADESH");
    const BIHAR: (&str, &str) = ("05", "BIHAR");
    const BHOPAL: (&str, &str) = ("1752", "BHOPAL");
    const INDORE: (&str, &str) = ("1738", "INDORE");
    const SEHORE: (&str, &str) = ("1750", "SEHORE");
    const PATNA: (&str, &str) = ("0521", "PATNA");
    const GAYA: (&str, &str) = ("0536", "GAYA");

    let records = vec![
        district_month("2023-2024", "Jun", MP, BHOPAL, 0.55, 221.50, 88.40),
        district_month("2023-2024", "Sep", MP, BHOPAL, 0.65, 227.80, 90.15),
        district_month("2023-2024", "Dec", MP, BHOPAL, 0.78, 232.10, 93.60),
        district_month("2023-2024", "Mar", MP, BHOPAL, 0.85, 236.75, 95.20),
        district_month("2024-2025", "Jun", MP, BHOPAL, 0.90, 240.30, 97.05),
        district_month("2024-2025", "Sep", MP, BHOPAL, 0.95, 243.15, 98.50),
        district_month("2024-2025", "Dec", MP, BHOPAL, 1.00, 245.41, 99.92),
        district_month("2024-2025", "Sep", MP, INDORE, 1.10, 248.90, 96.80),
        district_month("2024-2025", "Dec", MP, INDORE, 1.18, 251.20, 97.45),
        district_month("2024-2025", "Dec", MP, SEHORE, 0.62, 238.60, 94.30),
        district_month("2023-2024", "Mar", BIHAR, PATNA, 1.30, 219.40, 90.75),
        district_month("2024-2025", "Dec", BIHAR, PATNA, 1.42, 228.00, 93.10),
        district_month("2024-2025", "Dec", BIHAR, GAYA, 1.05, 224.30, 91.80),
    ];

    ApiResponse {
        title: "District-wise MGNREGA Data at a Glance".to_string(),
        desc: "District-wise MGNREGA Data at a Glance".to_string(),
        source: "data.gov.in".to_string(),
        version: "2.2.0".to_string(),
        status: "ok".to_string(),
        total: records.len() as u64,
        count: records.len() as u64,
        limit: "1000".to_string(),
        offset: "0".to_string(),
        records,
        ..ApiResponse::default()
    }
}
