//! Output rendering for a priced bundle and for promotion listings.

use std::fmt::Write;

use pricing_core::{AppliedDiscount, BundleCalculation, Money, Promotion};

use crate::config::OutputFormat;
use crate::error::QuoteResult;

const COLUMN_WIDTH: usize = 12;

/// Renders a calculation in the requested format.
pub fn render(
    calculation: &BundleCalculation,
    format: OutputFormat,
    pretty: bool,
) -> QuoteResult<String> {
    match format {
        OutputFormat::Json => render_json(calculation, pretty),
        OutputFormat::Text => Ok(render_text(calculation)),
    }
}

pub fn render_json(calculation: &BundleCalculation, pretty: bool) -> QuoteResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(calculation)?
    } else {
        serde_json::to_string(calculation)?
    };
    Ok(json)
}

/// Renders the promotions active on a date.
pub fn render_promotions(
    promotions: &[&Promotion],
    format: OutputFormat,
    pretty: bool,
) -> QuoteResult<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(promotions)?),
        OutputFormat::Json => Ok(serde_json::to_string(promotions)?),
        OutputFormat::Text => Ok(promotions_text(promotions)),
    }
}

fn promotions_text(promotions: &[&Promotion]) -> String {
    if promotions.is_empty() {
        return "No active promotions".to_string();
    }

    let mut out = String::from("Active promotions\n");
    for promo in promotions {
        let period = match promo.duration_months {
            Some(months) => format!("{} months", months),
            None => "permanent".to_string(),
        };
        out.push_str(&format!(
            "  {:<12}{:<40}{} to {}  {}\n",
            promo.id,
            promo.name,
            promo.start_date.format("%Y-%m-%d"),
            promo.end_date.format("%Y-%m-%d"),
            period
        ));
        if !promo.excluded_promos.is_empty() {
            let excluded = promo.excluded_promos.join(", ");
            out.push_str(&format!("  {:<12}excludes {}\n", "", excluded));
        }
    }
    out
}

/// Human-readable quote: bundle contents, applied discounts, the month
/// table and the summary.
pub fn render_text(calculation: &BundleCalculation) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_text(&mut out, calculation);
    out
}

fn write_text(out: &mut String, calc: &BundleCalculation) -> std::fmt::Result {
    writeln!(out, "Bundle")?;
    for product in &calc.products {
        line(out, &format!("{} ({})", product.name, product.id), product.monthly_price())?;
    }
    for option in &calc.options {
        line(out, &format!("+ {} ({})", option.name, option.id), option.monthly_price())?;
    }
    line(out, "Base monthly total", calc.base_monthly_total)?;

    write_discounts(out, "Price rules", &calc.applied_price_rules)?;
    write_discounts(out, "Promotions", &calc.applied_promotions)?;

    writeln!(out)?;
    writeln!(
        out,
        "{:>5}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}",
        "Month",
        "Base",
        "Permanent",
        "Promo",
        "Monthly",
        "Fees",
        "Due",
        w = COLUMN_WIDTH
    )?;
    for month in &calc.monthly_breakdown {
        writeln!(
            out,
            "{:>5}{}{}{}{}{}{}",
            month.month,
            cell(month.base_price),
            cell(-month.permanent_discounts),
            cell(-month.temporary_discounts),
            cell(month.total_monthly),
            cell(month.one_time_fees),
            cell(month.total_due),
        )?;
    }

    let summary = &calc.summary;
    writeln!(out)?;
    writeln!(out, "Summary")?;
    line(out, "First month", summary.first_month_total)?;
    if summary.promotional_period_months > 0 {
        line(
            out,
            &format!(
                "Promotional monthly ({} months)",
                summary.promotional_period_months
            ),
            summary.promotional_period_monthly,
        )?;
    }
    line(out, "Monthly afterwards", summary.permanent_monthly)?;
    line(out, "First year", summary.first_year_total)?;
    if summary.second_year_total.is_positive() {
        line(out, "Second year", summary.second_year_total)?;
    }

    if !calc.is_valid_bundle {
        if let Some(message) = &calc.validation_message {
            writeln!(out)?;
            writeln!(out, "Warning: {}", message)?;
        }
    }

    Ok(())
}

fn write_discounts(
    out: &mut String,
    title: &str,
    discounts: &[AppliedDiscount],
) -> std::fmt::Result {
    if discounts.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", title)?;
    for discount in discounts {
        let period = match discount.duration_months {
            Some(months) => format!("{} months", months),
            None => "permanent".to_string(),
        };
        writeln!(
            out,
            "  {:<40}{} {}",
            format!("{} ({})", discount.name, discount.id),
            cell(-discount.discount_amount),
            period
        )?;
    }
    Ok(())
}

fn line(out: &mut String, label: &str, amount: Money) -> std::fmt::Result {
    writeln!(out, "  {:<40}{}", label, cell(amount))
}

// Money's Display ignores width, so pad the rendered string.
fn cell(amount: Money) -> String {
    format!("{:>w$}", amount.to_string(), w = COLUMN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pricing_core::{
        calculate_bundle_pricing, BundleContext, CalculationMethod, Product, PromoType,
    };

    fn promotion() -> Promotion {
        Promotion {
            id: "PROMO001".to_string(),
            name: "-15 for 6 months".to_string(),
            promo_type: PromoType::Discount,
            calculation_method: CalculationMethod::Amount,
            calculation_value: 1500,
            duration_months: Some(6),
            start_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap(),
            rules: vec![],
            excluded_promos: vec![],
            calculation_order: 0,
            legal_summary: None,
        }
    }

    fn calculation(months: u32) -> BundleCalculation {
        let context = BundleContext::new(
            vec![Product {
                id: "54801".to_string(),
                name: "Internet 500 Mbps".to_string(),
                group_id: "54776".to_string(),
                monthly_price_cents: 5900,
                activation_fee_cents: 3900,
                installation_fee_cents: 0,
            }],
            vec![],
            Utc.with_ymd_and_hms(2025, 10, 27, 0, 0, 0).unwrap(),
            months,
        );
        calculate_bundle_pricing(&context, &[], &[promotion()])
    }

    #[test]
    fn test_text_has_one_row_per_month() {
        let text = render_text(&calculation(12));
        let rows = text
            .lines()
            .filter(|l| {
                l.split_whitespace()
                    .next()
                    .map_or(false, |word| word.parse::<u32>().is_ok())
            })
            .count();
        assert_eq!(rows, 12);
    }

    #[test]
    fn test_text_contents() {
        let text = render_text(&calculation(24));

        assert!(text.contains("Internet 500 Mbps (54801)"));
        assert!(text.contains("-15 for 6 months (PROMO001)"));
        assert!(text.contains("6 months"));
        assert!(text.contains("-€15.00"));
        // 5900 - 1500 + 3900 fees
        assert!(text.contains("€83.00"));
        assert!(text.contains("Promotional monthly (6 months)"));
        assert!(text.contains("Second year"));
        assert!(!text.contains("Price rules"));
    }

    #[test]
    fn test_text_omits_second_year_for_short_projection() {
        let text = render_text(&calculation(6));
        assert!(!text.contains("Second year"));
    }

    #[test]
    fn test_promotion_list() {
        let mut promo = promotion();
        promo.excluded_promos = vec!["PROMO002".to_string()];

        let text = render_promotions(&[&promo], OutputFormat::Text, true).unwrap();
        assert!(text.starts_with("Active promotions"));
        assert!(text.contains("PROMO001"));
        assert!(text.contains("2025-01-01 to 2025-12-31"));
        assert!(text.contains("excludes PROMO002"));

        let json = render_promotions(&[&promo], OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "PROMO001");

        let empty = render_promotions(&[], OutputFormat::Text, true).unwrap();
        assert_eq!(empty, "No active promotions");
    }

    #[test]
    fn test_json_output() {
        let calc = calculation(12);

        let compact = render(&calc, OutputFormat::Json, false).unwrap();
        assert!(!compact.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["base_monthly_total"], 5900);
        assert_eq!(value["monthly_breakdown"].as_array().unwrap().len(), 12);
        assert_eq!(value["applied_promotions"][0]["type"], "promotion");

        let pretty = render(&calc, OutputFormat::Json, true).unwrap();
        assert!(pretty.contains('\n'));
    }
}
