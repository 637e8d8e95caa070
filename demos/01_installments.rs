/// installments - split one request into monthly loans and pay them with controlled time
use loanbook_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use loanbook_rs::{
    Client, InstallmentPlan, InterestType, LedgerConfig, LoanBook, Money, PenaltyType,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== installments example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
    ));
    let control = time.test_control().ok_or("test time expected")?;

    let mut book = LoanBook::new(LedgerConfig::brazil())?;
    let client = book.add_client(Client::new("Bruno Lima", "21 99876-5432", time.now()))?;

    let plan = InstallmentPlan::builder()
        .client(client)
        .total(Money::from_major(3_000))
        .installments(3)
        .first_due_date(NaiveDate::from_ymd_opt(2024, 1, 31).ok_or("invalid date")?)
        .interest(InterestType::Percentage, dec!(8))
        .penalty(PenaltyType::DailyPercentage, dec!(0.5))
        .build()?;
    let ids = book.create_loans_now(plan, &time)?;

    for loan in book.loans() {
        println!(
            "parcela {}/{} vence {} valor {}",
            loan.installment_number.unwrap_or(1),
            loan.installment_total.unwrap_or(1),
            loan.due_date,
            book.config().currency.format(loan.amount)
        );
    }

    // first installment paid on time, second one late
    control.advance(Duration::days(20));
    book.mark_paid_now(ids[0], &time)?;
    control.advance(Duration::days(40));
    book.mark_paid_now(ids[1], &time)?;

    println!("\nhoje: {}", book.today(&time));
    for calc in book.calculated_loans_now(&time) {
        println!(
            "{:?} atraso {} dias, total {}",
            calc.standing(),
            calc.days_overdue,
            book.config().currency.format(calc.final_total)
        );
    }

    Ok(())
}
