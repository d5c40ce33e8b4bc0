//! Output formatting module
//!
//! Table output rounds amounts and weights to two decimals; JSON output
//! carries the values unrounded.

use serde::Serialize;
use shipwise_domain::model::{
    ChargeBreakdown, ChargeableWeight, OrderHandoffRequest, ParcelSpec, RateSet, Warehouse,
};
use shipwise_infra::parcel_csv::ParcelRow;
use shipwise_types::{OutputFormat, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[derive(Serialize)]
struct WeightReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
    parcel: &'a ParcelSpec,
    #[serde(flatten)]
    weight: &'a ChargeableWeight,
    basis: &'static str,
}

pub fn output_weight(
    output_format: OutputFormat,
    parcel: &ParcelSpec,
    weight: &ChargeableWeight,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&WeightReport {
            reference: None,
            parcel,
            weight,
            basis: weight.basis().label(),
        });
    }

    let d = &parcel.dimensions;
    println!("\nChargeable Weight");
    println!("=================");
    println!(
        "Dimensions:      {} x {} x {} cm",
        amount(d.length_cm),
        amount(d.width_cm),
        amount(d.height_cm)
    );
    println!("Actual weight:   {} kg", amount(weight.actual_kg));
    println!("Volumetric:      {} kg", amount(weight.volumetric_kg));
    println!(
        "Chargeable:      {} kg ({})",
        amount(weight.chargeable_kg),
        weight.basis().label()
    );
    Ok(())
}

pub fn output_weights(
    output_format: OutputFormat,
    rows: &[(ParcelRow, ChargeableWeight)],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let reports: Vec<WeightReport<'_>> = rows
            .iter()
            .map(|(row, weight)| WeightReport {
                reference: Some(row.reference.as_str()),
                parcel: &row.parcel,
                weight,
                basis: weight.basis().label(),
            })
            .collect();
        return print_json(&reports);
    }

    println!(
        "{:<16} {:>10} {:>12} {:>12}  {}",
        "Reference", "Actual", "Volumetric", "Chargeable", "Basis"
    );
    println!("{}", "-".repeat(66));
    for (row, weight) in rows {
        println!(
            "{:<16} {:>10} {:>12} {:>12}  {}",
            row.reference,
            amount(weight.actual_kg),
            amount(weight.volumetric_kg),
            amount(weight.chargeable_kg),
            weight.basis().label()
        );
    }
    let total: f64 = rows.iter().map(|(_, w)| w.chargeable_kg).sum();
    println!("{}", "-".repeat(66));
    println!("{} parcels, {} kg chargeable", rows.len(), amount(total));
    Ok(())
}

pub fn output_rates(output_format: OutputFormat, rates: &RateSet) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(rates);
    }

    println!(
        "\nZone: {}  (quoted {})",
        rates.zone.as_deref().unwrap_or("-"),
        rates.quoted_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if rates.is_empty() {
        println!("No couriers serve this route.");
        return Ok(());
    }

    println!(
        "{:<20} {:<8} {:>10} {:>8} {:>8} {:>10}  {}",
        "Courier", "Mode", "Shipping", "COD", "GST", "Total", "Delivery"
    );
    println!("{}", "-".repeat(84));
    for q in &rates.quotes {
        println!(
            "{:<20} {:<8} {:>10} {:>8} {:>8} {:>10}  {}",
            q.courier_name,
            q.mode.as_str(),
            amount(q.shipping_cost),
            amount(q.cod_charge),
            amount(q.gst_amount),
            amount(q.total_amount),
            q.estimated_delivery_window.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingReport<'a> {
    workflow_id: String,
    #[serde(flatten)]
    order: &'a OrderHandoffRequest,
}

pub fn output_booking(
    output_format: OutputFormat,
    workflow_id: &str,
    order: &OrderHandoffRequest,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&BookingReport {
            workflow_id: workflow_id.to_string(),
            order,
        });
    }

    let charges: &ChargeBreakdown = &order.charges;
    println!("\nOrder Handed Off");
    println!("================");
    println!("Courier:         {} ({})", order.courier, order.mode);
    if let Some(ref id) = order.warehouse {
        println!("Warehouse:       {}", id);
    }
    if let Some(ref id) = order.rto_warehouse {
        println!("RTO warehouse:   {}", id);
    }
    println!("Shipping:        {}", amount(charges.shipping_charge));
    println!("COD charge:      {}", amount(charges.cod_charge));
    println!("GST:             {}", amount(charges.gst));
    println!("Total:           {}", amount(charges.total));
    println!("\nWorkflow:        {}", workflow_id);
    Ok(())
}

pub fn output_warehouses(output_format: OutputFormat, warehouses: &[Warehouse]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(warehouses);
    }

    if warehouses.is_empty() {
        println!("No warehouses configured.");
        return Ok(());
    }
    println!("{:<14} {:<8} {:<30} {}", "ID", "Pincode", "Name", "");
    println!("{}", "-".repeat(60));
    for w in warehouses {
        println!(
            "{:<14} {:<8} {:<30} {}",
            w.id,
            w.pincode,
            w.name,
            if w.default { "(default)" } else { "" }
        );
    }
    Ok(())
}
