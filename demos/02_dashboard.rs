/// dashboard - realized profit, forecasts and the monthly chart as text and json
use loanbook_rs::chrono::{NaiveDate, TimeZone, Utc};
use loanbook_rs::logging::init_tracing;
use loanbook_rs::{
    Client, Expense, InterestType, LedgerConfig, Loan, LoanBook, LoanTerms, Money, PenaltyType,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut book = LoanBook::new(LedgerConfig::brazil())?;
    let ana = book.add_client(Client::new("Ana", "11 90000-0001", Utc::now()))?;
    let caio = book.add_client(Client::new("Caio", "11 90000-0002", Utc::now()))?;

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid date");

    for (client, amount, due, paid) in [
        (ana, 1_000, date(2024, 2, 10)?, Some(Utc.with_ymd_and_hms(2024, 2, 9, 15, 0, 0).unwrap())),
        (ana, 2_500, date(2024, 4, 5)?, Some(Utc.with_ymd_and_hms(2024, 4, 12, 15, 0, 0).unwrap())),
        (caio, 800, date(2024, 5, 20)?, Some(Utc.with_ymd_and_hms(2024, 5, 20, 15, 0, 0).unwrap())),
        (caio, 1_200, date(2024, 6, 14)?, None),
        (ana, 600, date(2024, 6, 2)?, None),
    ] {
        let terms = LoanTerms::new(Money::from_major(amount), due)
            .with_interest(InterestType::Percentage, dec!(15))
            .with_penalty(PenaltyType::DailyValue, dec!(5));
        let mut loan = Loan::new(client, terms, Utc::now());
        if let Some(at) = paid {
            loan.mark_paid(at);
        }
        book.add_loan(loan)?;
    }

    book.add_expense(
        Expense::new("combustível", Money::from_major(120), date(2024, 6, 3)?, Utc::now())
            .with_category("Transporte"),
    )?;
    book.add_expense(Expense::new("café", Money::from_major(18), date(2024, 6, 5)?, Utc::now()))?;

    let dashboard = book.dashboard(date(2024, 6, 12)?);
    println!("{}\n", dashboard.render(&book.config().currency));
    println!("{}", dashboard.to_json_pretty()?);

    Ok(())
}
