use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Placeholder the model writes when it has no data for a field.
pub const SENTINEL: &str = "-";

/// One entry of the company profile schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    /// Label in the registry's own language, used in the prompt gloss.
    pub native_label: &'static str,
    pub description: &'static str,
    /// Row label on the result card. `None` for fields rendered as headings.
    pub display_label: Option<&'static str>,
}

const fn field(
    key: &'static str,
    native_label: &'static str,
    description: &'static str,
    display_label: Option<&'static str>,
) -> FieldSpec {
    FieldSpec {
        key,
        native_label,
        description,
        display_label,
    }
}

/// Every key the model is asked to return, in prompt order.
pub static PROFILE_FIELDS: [FieldSpec; 15] = [
    field("company_name", "企業名", "Official company name", None),
    field("furigana", "フリガナ", "Phonetic reading of the company name", None),
    field("address", "住所", "Full company address", Some("Address")),
    field("corporate_number", "法人番号", "Corporate number", Some("Corporate Number")),
    field("representative_name", "代表者名", "Name of the representative", Some("Representative")),
    field("industry", "業種", "Industry or business category", Some("Industry")),
    field("url", "URL", "The full, official URL of the company's website.", Some("URL")),
    field("founded_date", "設立", "Date of establishment", Some("Founded")),
    field("capital", "資本金", "Amount of capital", Some("Capital")),
    field("employee_count", "従業員数", "Number of employees", Some("Employees")),
    field("phone_number", "電話番号", "Official phone number", Some("Phone Number")),
    field("listing_status", "上場区分", "Listing status (e.g., Unlisted)", Some("Listing Status")),
    field("stock_code", "証券コード", "Stock code, if applicable", Some("Stock Code")),
    field(
        "invoice_registration_number",
        "インボイス登録番号",
        "Invoice registration number",
        Some("Invoice Number"),
    ),
    field(
        "introduction",
        "企業の詳細紹介",
        "A detailed introduction of the company summarized from its official website.",
        None,
    ),
];

/// Company record returned by a web-grounded lookup.
///
/// Every field is optional. `null`, the `"-"` sentinel and blank strings all
/// deserialize to `None`, so callers never see the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    #[serde(deserialize_with = "lenient_field")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub furigana: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub corporate_number: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub representative_name: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub industry: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub founded_date: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub capital: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub employee_count: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub listing_status: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub stock_code: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub invoice_registration_number: Option<String>,
    #[serde(deserialize_with = "lenient_field")]
    pub introduction: Option<String>,
}

impl CompanyProfile {
    /// Looks a field up by its schema key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "company_name" => &self.company_name,
            "furigana" => &self.furigana,
            "address" => &self.address,
            "corporate_number" => &self.corporate_number,
            "representative_name" => &self.representative_name,
            "industry" => &self.industry,
            "url" => &self.url,
            "founded_date" => &self.founded_date,
            "capital" => &self.capital,
            "employee_count" => &self.employee_count,
            "phone_number" => &self.phone_number,
            "listing_status" => &self.listing_status,
            "stock_code" => &self.stock_code,
            "invoice_registration_number" => &self.invoice_registration_number,
            "introduction" => &self.introduction,
            _ => return None,
        };
        value.as_deref()
    }

    pub fn present_fields(&self) -> Vec<(&'static FieldSpec, &str)> {
        PROFILE_FIELDS
            .iter()
            .filter_map(|spec| self.get(spec.key).map(|value| (spec, value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

/// Normalises one profile value. Numbers and booleans are kept as text since
/// the model occasionally drops the quotes around counts and codes.
pub fn normalize_value(value: Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == SENTINEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn lenient_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_value(Value::deserialize(deserializer)?))
}

/// Company details read off a business card, used to pre-fill the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedContact {
    #[schemars(description = "The company name printed on the business card")]
    pub company_name: String,

    #[schemars(
        description = "The company address, limited to prefecture and city (e.g. 東京都千代田区)"
    )]
    pub company_address: String,
}

impl ExtractedContact {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExtractedContact)
    }

    /// Schema for the model's structured-output mode, without the `$schema`
    /// and `title` meta keys the API does not accept.
    pub fn response_schema() -> Value {
        let mut schema = json!(Self::generate_json_schema());
        if let Some(object) = schema.as_object_mut() {
            object.remove("$schema");
            object.remove("title");
        }
        schema
    }
}
