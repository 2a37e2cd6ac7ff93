//! Receipt rendering

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    discounts::points,
    receipt::{LineBreakdown, PriceCalculationResult},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PriceCalculationResult<'_> {
    /// Writes the line table followed by the totals summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written or savings cannot be calculated.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if !self.lines().is_empty() {
            write_line_table(&mut out, self.lines())?;
        }

        write_summary(&mut out, self)
    }
}

fn write_line_table(
    out: &mut impl io::Write,
    lines: &[LineBreakdown<'_>],
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Product", "Qty", "Unit Price", "Line Total", "Discount"]);

    for (idx, line) in lines.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.product.to_string(),
            line.quantity.to_string(),
            format!("{}", line.unit_price),
            format!("{}", line.line_total),
            discount_cell(&line.discount),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..6), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn discount_cell(discount: &Money<'_, Currency>) -> String {
    if discount.to_minor_units() == 0 {
        String::new()
    } else {
        format!("-{discount}")
    }
}

fn write_summary(
    out: &mut impl io::Write,
    result: &PriceCalculationResult<'_>,
) -> Result<(), ReceiptError> {
    let mut rows = vec![("Subtotal:".to_string(), format!("{}", result.subtotal()))];

    if result.discount_amount().to_minor_units() > 0 {
        rows.push((
            "Discount:".to_string(),
            format!("-{}", result.discount_amount()),
        ));
    }

    if let Some(code) = result.promo_code() {
        rows.push((
            format!("Promo code {code}:"),
            format!("-{}", result.promo_code_amount()),
        ));
    }

    if let Some(code) = result.coupon_code() {
        rows.push((
            format!("Coupon {code}:"),
            format!("-{}", result.coupon_amount()),
        ));
    }

    let savings_points = points(&result.savings_percent()?).round_dp(2);

    rows.push(("Total:".to_string(), format!("{}", result.total())));
    rows.push((
        "Savings:".to_string(),
        format!("({savings_points:.2}%) {}", result.charged_savings()?),
    ));

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    writeln!(out)?;

    Ok(())
}
