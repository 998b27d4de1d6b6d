use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use recon_engine::models::TransactionType;
use rust_decimal::Decimal;
use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const PROBABILITY_ERROR: f64 = 0.05;
const UNMATCHED_SHARE: f64 = 0.05;
const INVALID_DATE: &str = "2024-13-45";
const YEAR_SECONDS: i64 = 366 * 24 * 60 * 60 - 1;

struct GeneratorConfig {
    num_transactions: usize,
    bank_names: Vec<String>,
    output_dir: PathBuf
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_transactions = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
        let num_banks = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5usize).max(1);

        Self {
            num_transactions,
            bank_names: (1..=num_banks).map(|index| format!("bank_{index:02}")).collect(),
            output_dir: PathBuf::from("samples/generated")
        }
    }
}

struct GeneratedTransaction {
    id: String,
    amount: Decimal,
    transaction_type: TransactionType,
    transaction_time: NaiveDateTime
}

#[derive(Default)]
struct BankTally {
    matched: usize,
    discrepancies: usize,
    unmatched: usize,
    errors: usize
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();
    let mut rng = rand::thread_rng();

    create_dir_all(&config.output_dir)?;

    println!(
        "Generating {} transactions across {} bank files in {}...",
        config.num_transactions, config.bank_names.len(), config.output_dir.display()
    );

    let mut transactions: Vec<GeneratedTransaction> = (1..=config.num_transactions)
        .map(|index| generate_transaction(&mut rng, index))
        .collect();

    write_transactions(&config.output_dir.join("transactions.csv"), &transactions)?;

    transactions.shuffle(&mut rng);

    let share = transactions.len().div_ceil(config.bank_names.len()).max(1);

    for (bank_name, bank_transactions) in config.bank_names.iter().zip(transactions.chunks(share)) {
        let path = config.output_dir.join(format!("{bank_name}.csv"));
        let tally = write_bank_file(&path, &mut rng, bank_name, bank_transactions)?;

        println!(
            "  {bank_name}.csv: {} matched, {} discrepancies, {} unmatched, {} error rows",
            tally.matched, tally.discrepancies, tally.unmatched, tally.errors
        );
    }

    println!("Generation complete.");

    Ok(())
}

fn generate_transaction<R: Rng>(rng: &mut R, index: usize) -> GeneratedTransaction {
    let transaction_type = if rng.gen_bool(0.5) { TransactionType::Debit } else { TransactionType::Credit };

    GeneratedTransaction {
        id: format!("TRX{index:08}"),
        amount: generate_random_amount(rng),
        transaction_type,
        transaction_time: generate_random_datetime(rng)
    }
}

fn generate_random_amount<R: Rng>(rng: &mut R) -> Decimal {
    Decimal::new(rng.gen_range(1_000..=1_000_000), 2)
}

fn generate_random_datetime<R: Rng>(rng: &mut R) -> NaiveDateTime {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    start + Duration::seconds(rng.gen_range(0..=YEAR_SECONDS))
}

fn signed_amount(transaction_type: TransactionType, amount: Decimal) -> Decimal {
    match transaction_type {
        TransactionType::Debit => -amount,
        TransactionType::Credit => amount
    }
}

fn write_transactions(path: &Path, transactions: &[GeneratedTransaction]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "trx_id,amount,type,transaction_time")?;

    for transaction in transactions {
        writeln!(
            writer,
            "{},{},{},{}",
            transaction.id,
            transaction.amount,
            transaction.transaction_type,
            transaction.transaction_time.format("%Y-%m-%dT%H:%M:%SZ")
        )?;
    }

    writer.flush()
}

fn write_bank_file<R: Rng>(path: &Path, rng: &mut R, bank_name: &str, transactions: &[GeneratedTransaction]) -> io::Result<BankTally> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut tally = BankTally::default();

    writeln!(writer, "trx_ref_id,amount,date")?;

    for transaction in transactions {
        let date = transaction.transaction_time.format("%Y-%m-%d").to_string();
        let bank_amount = signed_amount(transaction.transaction_type, transaction.amount);

        if !rng.gen_bool(PROBABILITY_ERROR) {
            writeln!(writer, "{},{},{}", transaction.id, bank_amount, date)?;
            tally.matched += 1;
            continue;
        }

        match rng.gen_range(0..4) {
            0 => {
                writeln!(writer, "{},invalid_amount,{}", transaction.id, date)?;
                tally.errors += 1;
            }
            1 => {
                writeln!(writer, "{},{},{}", transaction.id, bank_amount, INVALID_DATE)?;
                tally.errors += 1;
            }
            2 => {
                writeln!(writer, "{},,{}", transaction.id, date)?;
                tally.errors += 1;
            }
            _ => {
                let drift = Decimal::new(rng.gen_range(-10_000..=10_000), 2);
                let skewed = signed_amount(transaction.transaction_type, transaction.amount + drift);
                writeln!(writer, "{},{},{}", transaction.id, skewed, date)?;
                tally.discrepancies += 1;
            }
        }
    }

    let num_unmatched = (transactions.len() as f64 * UNMATCHED_SHARE) as usize;

    for index in 0..num_unmatched {
        let date = generate_random_datetime(rng).format("%Y-%m-%d");
        writeln!(writer, "BANK_{}_{index:06},{},{}", bank_name.to_uppercase(), generate_random_amount(rng), date)?;
        tally.unmatched += 1;
    }

    writer.flush()?;

    Ok(tally)
}
