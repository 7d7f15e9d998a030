use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::models::{BudgetDeclaration, Category, Expense, PREDEFINED_CATEGORIES};
use crate::parse::{parse_amount, parse_category, parse_date, parse_menu_choice, parse_month};
use crate::store::RecordStore;

enum Flow {
    Continue,
    Exit,
}

struct Prompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Print `label` and read one trimmed line. `None` at end of input.
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}

/// Ask, or leave the menu when input runs out.
macro_rules! ask_or_exit {
    ($prompt:expr, $label:expr) => {
        match $prompt.ask($label)? {
            Some(answer) => answer,
            None => return Ok(Flow::Exit),
        }
    };
}

/// Unwrap a validated value, or report the problem and go back to the menu.
macro_rules! valid_or_return {
    ($prompt:expr, $result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                $prompt.say(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        }
    };
}

pub(crate) fn as_menu<S, R, W>(store: &S, input: R, out: W, today: NaiveDate) -> Result<()>
where
    S: RecordStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut prompt = Prompt { input, out };

    loop {
        prompt.say("\n==== Expense Tracker ====")?;
        prompt.say("1. Enter an expense")?;
        prompt.say("2. Set/Update a budget")?;
        prompt.say("3. Monthly spending log")?;
        prompt.say("4. Compare spending vs budget")?;
        prompt.say("5. Exit")?;

        let Some(choice) = prompt.ask("Choose an option (1-5): ")? else {
            break;
        };
        debug!(choice = %choice, "menu selection");

        let flow = match choice.as_str() {
            "1" => enter_expense(store, &mut prompt, today)?,
            "2" => enter_budget(store, &mut prompt)?,
            "3" => {
                prompt.say("\n-- Monthly spending log --")?;
                super::show_monthly_totals(store, &mut prompt.out)?;
                Flow::Continue
            }
            "4" => compare(store, &mut prompt)?,
            "5" => {
                prompt.say("Thank you!")?;
                Flow::Exit
            }
            _ => {
                prompt.say("Invalid choice. Try 1 to 5.")?;
                Flow::Continue
            }
        };

        if let Flow::Exit = flow {
            break;
        }
    }
    Ok(())
}

fn enter_expense<S, R, W>(store: &S, prompt: &mut Prompt<R, W>, today: NaiveDate) -> Result<Flow>
where
    S: RecordStore + ?Sized,
    R: BufRead,
    W: Write,
{
    prompt.say("\n-- Enter an expense --")?;
    for (i, label) in PREDEFINED_CATEGORIES.iter().enumerate() {
        prompt.say(&format!("{}. {label}", i + 1))?;
    }

    let choice = ask_or_exit!(prompt, "Select category number: ");
    let choice = valid_or_return!(
        prompt,
        parse_menu_choice(&choice, PREDEFINED_CATEGORIES.len())
    );
    let mut category = valid_or_return!(
        prompt,
        Category::from_choice(choice).ok_or_else(|| anyhow::anyhow!("Invalid category choice."))
    );

    if category.needs_description() {
        let description = ask_or_exit!(prompt, "Enter description for this expense: ");
        if description.is_empty() {
            prompt.say("Description cannot be empty.")?;
            return Ok(Flow::Continue);
        }
        category = Category::parse(&description);
    }

    let amount = ask_or_exit!(prompt, "Enter amount: ");
    let amount = valid_or_return!(prompt, parse_amount(&amount));

    let date = ask_or_exit!(prompt, "Enter date (YYYY-MM-DD) or leave blank for today: ");
    let date = valid_or_return!(prompt, parse_date(&date, today));

    let expense = Expense::new(date, category.to_string(), amount);
    super::log_expense(store, &expense, &mut prompt.out)?;
    Ok(Flow::Continue)
}

fn enter_budget<S, R, W>(store: &S, prompt: &mut Prompt<R, W>) -> Result<Flow>
where
    S: RecordStore + ?Sized,
    R: BufRead,
    W: Write,
{
    prompt.say("\n-- Set/Update a budget --")?;

    let month = ask_or_exit!(prompt, "Month (YYYY-MM): ");
    let month = valid_or_return!(prompt, parse_month(&month));

    let category = ask_or_exit!(prompt, "Category: ");
    let category = valid_or_return!(prompt, parse_category(&category));

    let limit = ask_or_exit!(prompt, "Budget amount: ");
    let limit = valid_or_return!(prompt, parse_amount(&limit));

    let budget = BudgetDeclaration::new(month, Category::parse(&category).to_string(), limit);
    super::set_budget(store, &budget, &mut prompt.out)?;
    Ok(Flow::Continue)
}

fn compare<S, R, W>(store: &S, prompt: &mut Prompt<R, W>) -> Result<Flow>
where
    S: RecordStore + ?Sized,
    R: BufRead,
    W: Write,
{
    prompt.say("\n-- Spending vs budget --")?;
    let month = ask_or_exit!(prompt, "Enter month (YYYY-MM): ");
    let month = valid_or_return!(prompt, parse_month(&month));
    super::show_spend_vs_budget(store, &month, &mut prompt.out)?;
    Ok(Flow::Continue)
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
