//! Scripted session over the starter roster - run with: cargo run --example walkthrough

use split_ledger::form::{AddFriendForm, SplitBillForm};
use split_ledger::ledger::Ledger;
use split_ledger::report::format_ledger;
use split_ledger::types::{OutputFormat, Payer};

fn print_ledger(ledger: &Ledger) {
    match format_ledger(ledger, OutputFormat::Human) {
        Ok(out) => println!("{}", out),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn main() {
    let mut ledger = Ledger::with_sample_friends();
    print_ledger(&ledger);

    // Sarah: bill of 100, you paid 40 and covered the whole bill
    let sarah = ledger.friends()[1].id.clone();
    if let Err(e) = ledger.select_friend(&sarah) {
        eprintln!("Error: {}", e);
        return;
    }
    let mut split = SplitBillForm::default();
    split.set_bill_value("100");
    split.set_paid_by_user("40");
    split.set_payer(Payer::User);
    match split.submit(&mut ledger) {
        Ok(delta) => println!("Split with Sarah: {:+}\n", delta),
        Err(e) => eprintln!("Error: {}", e),
    }

    // An empty name is rejected and nothing changes
    ledger.toggle_add_friend_form();
    let mut add = AddFriendForm::default();
    if let Err(e) = add.submit(&mut ledger) {
        println!("Add friend rejected: {}\n", e);
    }

    add.name = "Dana".into();
    match add.submit(&mut ledger) {
        Ok(id) => println!("Added Dana ({})\n", id),
        Err(e) => eprintln!("Error: {}", e),
    }

    print_ledger(&ledger);
}
