use crate::profile::{PROFILE_FIELDS, SENTINEL};

/// Instruction sent with a business-card image. The response shape itself is
/// enforced through the structured-output schema.
pub const CARD_EXTRACTION_PROMPT: &str = "This image is a business card. \
Read the company name and the company address printed on it. \
For the address, return only the prefecture and city (for example \"東京都千代田区\"), \
not the street, building or postal code. \
If either value cannot be read, return an empty string for it.";

/// Renders the JSON object template listing every profile key with its
/// bilingual gloss.
pub fn profile_schema_template() -> String {
    let mut template = String::from("{\n");
    for (i, spec) in PROFILE_FIELDS.iter().enumerate() {
        let separator = if i + 1 < PROFILE_FIELDS.len() { "," } else { "" };
        template.push_str(&format!(
            "  \"{}\": \"{} - {}\"{}\n",
            spec.key, spec.native_label, spec.description, separator
        ));
    }
    template.push('}');
    template
}

/// Builds the web-grounded lookup prompt for one company.
///
/// Pure: the same name and address always produce the same text. An empty
/// address omits the location clause entirely.
pub fn build_search_prompt(company_name: &str, company_address: &str) -> String {
    let location = if company_address.is_empty() {
        String::new()
    } else {
        format!(" located at \"{}\"", company_address)
    };

    format!(
        "Please find the official website and corporate information for the company named \"{name}\"{location}.\n\
         After finding the information, provide the following details.\n\
         Crucially, after identifying the official URL, analyze the content of the website \
         (especially pages like \"About Us\", \"Company Profile\", etc.) to generate a detailed company introduction.\n\
         Do not use information from any other sources besides official registries and the company's official homepage.\n\
         \n\
         Return your response as a single JSON object inside a markdown code block (```json).\n\
         \n\
         The JSON object must have the following structure, using the specified keys. \
         If a value is not available, return \"{sentinel}\" or null.\n\
         {template}\n",
        name = company_name,
        location = location,
        sentinel = SENTINEL,
        template = profile_schema_template(),
    )
}
