use crate::profile::{CompanyProfile, PROFILE_FIELDS};
use crate::screener::SearchState;

pub const IDLE_PLACEHOLDER: &str = "Results will be displayed here.";
pub const LOADING_TEXT: &str = "Searching...";
pub const ERROR_HEADING: &str = "Query Failed";

/// Detail rows in the order the result card lists them.
pub const DETAIL_ORDER: [&str; 12] = [
    "url",
    "address",
    "industry",
    "representative_name",
    "founded_date",
    "capital",
    "employee_count",
    "phone_number",
    "listing_status",
    "stock_code",
    "corporate_number",
    "invoice_registration_number",
];

/// Labelled detail rows that have a value, in card order.
pub fn detail_rows(profile: &CompanyProfile) -> Vec<(&'static str, &str)> {
    DETAIL_ORDER
        .iter()
        .filter_map(|key| {
            let label = PROFILE_FIELDS
                .iter()
                .find(|spec| spec.key == *key)
                .and_then(|spec| spec.display_label)?;
            profile.get(key).map(|value| (label, value))
        })
        .collect()
}

pub fn render_profile(profile: &CompanyProfile) -> String {
    let mut out = String::new();
    out.push_str(profile.company_name.as_deref().unwrap_or_default());
    out.push('\n');
    if let Some(furigana) = &profile.furigana {
        out.push_str(furigana);
        out.push('\n');
    }

    if let Some(introduction) = &profile.introduction {
        out.push_str("\nCompany Introduction\n");
        out.push_str(introduction);
        out.push('\n');
    }

    let rows = detail_rows(profile);
    if !rows.is_empty() {
        out.push('\n');
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in rows {
            out.push_str(&format!("{:<width$}  {}\n", label, value, width = width));
        }
    }
    out
}

pub fn render_search_state(state: &SearchState) -> String {
    match state {
        SearchState::Idle => format!("{}\n", IDLE_PLACEHOLDER),
        SearchState::Loading => format!("{}\n", LOADING_TEXT),
        SearchState::Error(message) => format!("{}\n{}\n", ERROR_HEADING, message),
        SearchState::Result(profile) => render_profile(profile),
    }
}
