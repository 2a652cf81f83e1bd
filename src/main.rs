use clap::Parser;
use payplan::application::planner::{BatchOutcome, plan_batch};
use payplan::application::summary::SpendSummary;
use payplan::domain::payment_method::DEFAULT_POINTS_ID;
use payplan::error::{PaymentError, Result};
use payplan::interfaces::csv::summary_writer::SummaryWriter;
use payplan::interfaces::json::orders_reader::OrdersReader;
use payplan::interfaces::json::payment_methods_reader::PaymentMethodsReader;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Orders JSON file
    orders: PathBuf,

    /// Payment methods JSON file
    payment_methods: PathBuf,

    /// Id of the payment method holding loyalty points
    #[arg(long, default_value = DEFAULT_POINTS_ID)]
    points_id: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(PaymentError::Usage(err.to_string()).exit_code());
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let methods = PaymentMethodsReader::open(&cli.payment_methods)?
        .with_points_id(cli.points_id)
        .payment_methods()?;
    let orders = OrdersReader::open(&cli.orders)?.orders(&methods)?;

    let outcome = plan_batch(&orders, &methods);
    let plan = match &outcome {
        BatchOutcome::NoOrders => return Ok(()),
        BatchOutcome::NoPaymentMethods => {
            println!("No payment methods available.");
            return Ok(());
        }
        BatchOutcome::AllZeroValue(_) => {
            println!("All orders have zero value.");
            return Ok(());
        }
        BatchOutcome::Infeasible(plan) => {
            eprintln!("Could not find a payment plan for orders.");
            plan
        }
        BatchOutcome::Planned(plan) => plan,
    };

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write_summary(&SpendSummary::from_plan(plan, &methods))?;

    Ok(())
}
