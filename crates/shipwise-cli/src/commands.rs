//! Command handlers

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands, ParcelArgs, RouteArgs};
use crate::output::{
    output_booking, output_rates, output_warehouses, output_weight, output_weights,
};
use shipwise_app::config::Config;
use shipwise_app::repository::{open_rate_coordinator, open_warehouse_repo, open_workflow};
use shipwise_app::{RateOutcome, ShipmentInputs, WorkflowError};
use shipwise_domain::model::{
    CourierQuote, Dimensions, OrderHandoffRequest, ParcelSpec, PaymentMode, Selection,
    ShippingMode,
};
use shipwise_domain::repository::WarehouseRepository;
use shipwise_domain::service::resolve_chargeable_weight;
use shipwise_infra::parcel_csv::load_parcels;
use shipwise_types::{Error, OutputFormat, Result};
use tracing::debug;

pub async fn execute(cli: Cli) -> Result<()> {
    // Load config
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Weight { parcel } => cmd_weight(output_format, &parcel),

        Commands::Weights { csv } => cmd_weights(output_format, &csv),

        Commands::Rates { route, parcel } => {
            cmd_rates(&config, output_format, &route, &parcel).await
        }

        Commands::Book {
            route,
            parcel,
            courier,
            mode,
            rto_warehouse,
        } => {
            cmd_book(
                &config,
                output_format,
                &route,
                &parcel,
                &courier,
                mode,
                rto_warehouse,
            )
            .await
        }

        Commands::Warehouses => cmd_warehouses(&config, output_format),

        Commands::Config {
            show,
            set_api_url,
            set_timeout,
            set_include_rto,
            set_output,
            set_warehouses,
            reset,
        } => cmd_config(
            show,
            set_api_url,
            set_timeout,
            set_include_rto,
            set_output,
            set_warehouses,
            reset,
        ),
    }
}

fn parcel_spec(args: &ParcelArgs) -> Result<ParcelSpec> {
    ParcelSpec::new(
        args.weight,
        Dimensions::new(args.length, args.width, args.height),
    )
    .map_err(|e| Error::InvalidParcel(e.to_string()))
}

/// Origin pincode for a route, plus the warehouse id it came from.
///
/// `--from` wins and the warehouse directory is never opened. Otherwise
/// `--warehouse` names one, falling back to the default warehouse. With none
/// of these the origin stays empty and the rate query reports it as missing.
pub fn resolve_origin<R, F>(route: &RouteArgs, open_repo: F) -> Result<(String, Option<String>)>
where
    R: WarehouseRepository,
    F: FnOnce() -> Result<R>,
{
    if let Some(ref from) = route.from {
        return Ok((from.clone(), None));
    }

    let repo = open_repo()?;
    let warehouse = match route.warehouse {
        Some(ref id) => Some(
            repo.find_by_id(id)?
                .ok_or_else(|| Error::UnknownWarehouse(id.clone()))?,
        ),
        None => repo.find_default()?,
    };

    Ok(match warehouse {
        Some(w) => {
            debug!(warehouse = %w.id, pincode = %w.pincode, "origin from warehouse");
            (w.pincode.as_str().to_string(), Some(w.id))
        }
        None => (String::new(), None),
    })
}

fn shipment_inputs(
    config: &Config,
    route: &RouteArgs,
    parcel: &ParcelArgs,
) -> Result<(ShipmentInputs, Option<String>)> {
    let (origin, warehouse) = resolve_origin(route, || open_warehouse_repo(config))?;
    let payment = match route.cod {
        Some(collectable_amount) => PaymentMode::CashOnDelivery { collectable_amount },
        None => PaymentMode::Prepaid,
    };
    let inputs = ShipmentInputs {
        origin,
        destination: route.to.clone(),
        parcel: parcel_spec(parcel)?,
        payment,
    };
    Ok((inputs, warehouse))
}

/// First quote for `courier` (ASCII case-insensitive) in `mode`
pub fn pick_quote<'a>(
    quotes: &'a [CourierQuote],
    courier: &str,
    mode: ShippingMode,
) -> Option<&'a CourierQuote> {
    quotes
        .iter()
        .find(|q| q.mode == mode && q.courier_name.eq_ignore_ascii_case(courier))
}

fn workflow_error(e: WorkflowError) -> Error {
    match e {
        WorkflowError::Rate(e) => Error::Rate(e),
        other => Error::Booking(other.to_string()),
    }
}

fn cmd_weight(output_format: OutputFormat, args: &ParcelArgs) -> Result<()> {
    let parcel = parcel_spec(args)?;
    let weight = resolve_chargeable_weight(&parcel);
    output_weight(output_format, &parcel, &weight)
}

fn cmd_weights(output_format: OutputFormat, csv: &Path) -> Result<()> {
    if !csv.exists() {
        return Err(Error::FileNotFound(csv.display().to_string()));
    }

    let rows = load_parcels(csv)?;
    debug!(count = rows.len(), path = %csv.display(), "parcels loaded");

    let weighed: Vec<_> = rows
        .into_iter()
        .map(|row| {
            let weight = resolve_chargeable_weight(&row.parcel);
            (row, weight)
        })
        .collect();
    output_weights(output_format, &weighed)
}

async fn cmd_rates(
    config: &Config,
    output_format: OutputFormat,
    route: &RouteArgs,
    parcel: &ParcelArgs,
) -> Result<()> {
    let (inputs, _) = shipment_inputs(config, route, parcel)?;
    let coordinator = open_rate_coordinator(config)?;
    let rates = coordinator.fetch_rates(&inputs.to_query()).await?;
    output_rates(output_format, &rates)
}

async fn cmd_book(
    config: &Config,
    output_format: OutputFormat,
    route: &RouteArgs,
    parcel: &ParcelArgs,
    courier: &str,
    mode: ShippingMode,
    rto_warehouse: Option<String>,
) -> Result<()> {
    let (inputs, warehouse) = shipment_inputs(config, route, parcel)?;
    let workflow = open_workflow(config)?;
    debug!(workflow = %workflow.id(), "booking");

    workflow.on_inputs_changed(inputs).map_err(workflow_error)?;
    workflow
        .set_warehouses(warehouse.clone(), rto_warehouse.clone())
        .map_err(workflow_error)?;

    let rates = match workflow.refresh_rates().await.map_err(workflow_error)? {
        RateOutcome::Applied(rates) => rates,
        RateOutcome::Discarded => {
            return Err(Error::Booking("rate response was superseded".to_string()))
        }
    };

    let courier_name = match pick_quote(&rates.quotes, courier, mode) {
        Some(quote) => {
            workflow.select(quote);
            quote.courier_name.clone()
        }
        // submit reports the selection as unmatched
        None => {
            workflow.select_by(Selection::new(courier, mode));
            courier.to_string()
        }
    };

    let charges = workflow
        .submit()
        .await
        .map_err(|e| Error::Booking(e.to_string()))?;

    let order = OrderHandoffRequest {
        courier: courier_name,
        mode,
        charges,
        warehouse,
        rto_warehouse,
    };
    output_booking(output_format, &workflow.id().to_string(), &order)
}

fn cmd_warehouses(config: &Config, output_format: OutputFormat) -> Result<()> {
    let repo = open_warehouse_repo(config)?;
    output_warehouses(output_format, &repo.find_all()?)
}

fn cmd_config(
    show: bool,
    set_api_url: Option<String>,
    set_timeout: Option<u64>,
    set_include_rto: Option<bool>,
    set_output: Option<OutputFormat>,
    set_warehouses: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    // the file as stored, without environment overrides
    let mut config = Config::load_from(&Config::config_path()?)?;
    let mut modified = false;

    if let Some(url) = set_api_url {
        config.api_base_url = url;
        modified = true;
    }

    if let Some(timeout) = set_timeout {
        config.timeout_secs = timeout;
        modified = true;
    }

    if let Some(include_rto) = set_include_rto {
        config.include_rto = include_rto;
        modified = true;
    }

    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }

    if let Some(path) = set_warehouses {
        config.warehouses_file = Some(path);
        modified = true;
    }

    if modified {
        // reject a base URL the clients could not use
        config.api_config_with_token(None)?;
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
