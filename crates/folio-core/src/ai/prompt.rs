//! Instruction template for AI-assisted report extraction.

/// Build the extraction instruction for one report. The model is asked for
/// a single JSON object; the schema carries fund-level financials alongside
/// the investment rows.
pub(crate) fn build_prompt(report_text: &str) -> String {
    format!(
        r#"You are a financial data extraction expert. Extract structured investment data from this VC fund quarterly report.

Report text:
{report_text}

Extract the following information and return ONLY a valid JSON object (no markdown, no explanations):

{{
  "fund_name": "the fund name (e.g. 'Tech Ventures Fund I', 'Innovation Capital LP')",
  "year": 2024,
  "quarter": 1,
  "capital_commitments": 50000000.00,
  "management_fees": 125000.00,
  "operating_costs": 50000.00,
  "formation_costs": 25000.00,
  "investments": [
    {{
      "company_name": "Company Name",
      "investment_date": "YYYY-MM-DD or null if not available",
      "cost": 1000000.00,
      "current_value": 1500000.00
    }}
  ]
}}

Rules:
1. Fund name: look for words like "Fund", "Capital", "Ventures", "Partners", "LP", "L.P." in the header or title.
2. Quarter: look for "Q1"-"Q4", "Quarter 1-4", or dates like "March 31" (Q1), "June 30" (Q2), "September 30" (Q3), "December 31" (Q4).
3. Year: extract from the quarter date or report date.
4. Capital commitments (fund size): look in the notes or fund information for "Capital Commitments", "Fund Size", "Total Commitments", "Committed Capital". This is usually in end-of-year reports. Return 0 if not found.
5. Management fees: look for "Management Fees", "Management Fee", "Advisory Fees" in the expenses section. Return this quarter's amount only (not cumulative). If not explicitly found, use the largest line item in operating expenses. Return 0 if no expenses found.
6. Operating costs: look for "Operating Expenses", "Operating Costs", "Fund Expenses", "Administrative Expenses". Return this quarter's amount only. Return 0 if not found.
7. Formation costs: look for "Formation Costs", "Formation Expenses", "Organizational Costs", "Setup Costs". These are typically one-time costs. Return 0 if not found.
8. For each investment, extract the company name (clean, no extra symbols), the investment date in YYYY-MM-DD format (or null), the cost/initial investment, and the current value/fair value.
9. Only include actual portfolio companies, never totals or subtotals.
10. All financial numbers must be numeric only, no currency symbols or commas.
11. Return valid JSON only."#
    )
}
