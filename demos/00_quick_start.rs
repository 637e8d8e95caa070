/// quick start - one loan, paid late, and its calculated figures
use loanbook_rs::chrono::{NaiveDate, TimeZone, Utc};
use loanbook_rs::{
    calculate_loan_details, format_currency, Client, CurrencyFormat, Decimal, InterestType, Loan,
    LoanTerms, Money, PenaltyType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new("Ana Souza", "11 91234-5678", Utc::now());

    // R$ 1.000 at 10%, due jan 10th, one-time 5% penalty when late
    let due = NaiveDate::from_ymd_opt(2024, 1, 10).ok_or("invalid date")?;
    let terms = LoanTerms::new(Money::from_major(1_000), due)
        .with_interest(InterestType::Percentage, Decimal::from(10))
        .with_penalty(PenaltyType::Fixed, Decimal::from(5));
    let mut loan = Loan::new(client.id, terms, Utc::now());

    // paid five days late
    loan.mark_paid(Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap());

    let today = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid date")?;
    let calc = calculate_loan_details(&loan, &[client], today);

    let brl = CurrencyFormat::brl();
    println!("cliente: {}", calc.client_name);
    println!("juros: {}", format_currency(calc.initial_interest, &brl));
    println!("dias de atraso: {}", calc.days_overdue);
    println!("multa: {}", format_currency(calc.penalty_amount, &brl));
    println!("total: {}", format_currency(calc.final_total, &brl));
    println!("lucro: {}", format_currency(calc.profit, &brl));

    Ok(())
}
