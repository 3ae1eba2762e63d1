//! Prompt loops: ask, validate, re-ask.
//!
//! Each loop wraps a pure validation function from [`crate::input`] (or an
//! id parse plus a keyed lookup) and keeps asking until it gets a valid
//! answer or the retry budget runs out. A failed attempt explains itself
//! before the next prompt; none of these errors is fatal on its own.

use orderdesk_catalog::{Catalog, Product};
use orderdesk_core::{CustomerId, DomainError, Upc};
use orderdesk_customers::CustomerDirectory;

use crate::console::Console;
use crate::error::SessionResult;
use crate::input::{parse_quantity, parse_yes_no};
use crate::limits::{Attempts, RetryLimit};

/// Ask a yes/no question until one of the recognized tokens is given.
pub fn ask_yes_no<C: Console>(
    console: &mut C,
    limit: RetryLimit,
    question: &str,
) -> SessionResult<bool> {
    let mut attempts = Attempts::new(limit);
    loop {
        let answer = console.prompt(question)?;
        match parse_yes_no(&answer) {
            Ok(yes) => return Ok(yes),
            Err(_) => {
                console.say("Please enter a valid response! (Y/N)")?;
                attempts.record_failure()?;
            }
        }
    }
}

/// Resolve a typed customer id against the directory.
///
/// Lists the known customers once, then prompts until an entered id
/// matches. Unknown and unparseable ids both just re-prompt.
pub fn select_customer<C: Console>(
    directory: &CustomerDirectory,
    console: &mut C,
    limit: RetryLimit,
) -> SessionResult<CustomerId> {
    console.say("Known customers:")?;
    for customer in directory.customers() {
        console.say(&customer.to_string())?;
    }

    let mut attempts = Attempts::new(limit);
    loop {
        let answer = console.prompt("Please enter your customer ID")?;
        match answer.parse::<CustomerId>() {
            Ok(id) => {
                if let Some(customer) = directory.get(id) {
                    tracing::debug!(customer_id = %id, "customer selected");
                    console.say(&format!(
                        "Welcome, {} {}",
                        customer.first_name(),
                        customer.last_name()
                    ))?;
                    return Ok(id);
                }
                console.say(&format!("No customer with ID {id}"))?;
            }
            Err(_) => {
                console.say("Please enter a numeric customer ID")?;
            }
        }
        attempts.record_failure()?;
    }
}

/// Resolve a UPC against the catalog.
///
/// Lists the catalog once, then prompts until an entered code matches.
pub fn select_product<C: Console>(
    catalog: &Catalog,
    console: &mut C,
    limit: RetryLimit,
) -> SessionResult<Upc> {
    console.say("Products:")?;
    for product in catalog.products() {
        console.say(&product.to_string())?;
    }

    let mut attempts = Attempts::new(limit);
    loop {
        let answer =
            console.prompt("Please enter the UPC of the product you would like to purchase.")?;
        match answer.parse::<Upc>() {
            Ok(upc) => {
                if catalog.get(&upc).is_some() {
                    return Ok(upc);
                }
                console.say(&format!("No product with UPC {upc}"))?;
            }
            Err(_) => {
                console.say("Please enter a UPC.")?;
            }
        }
        attempts.record_failure()?;
    }
}

/// Ask for a quantity until it is a positive whole number within the
/// product's current stock.
///
/// An over-stock request is rejected with a message naming the product and
/// re-prompted; it is never fatal and never touches the stock count.
pub fn select_quantity<C: Console>(
    product: &Product,
    console: &mut C,
    limit: RetryLimit,
) -> SessionResult<u32> {
    let mut attempts = Attempts::new(limit);
    loop {
        let answer = console
            .prompt("Please enter the quantity of this product you would like to purchase.")?;
        match parse_quantity(&answer) {
            Ok(quantity) if product.can_fulfill(quantity) => return Ok(quantity),
            Ok(quantity) => {
                let err = DomainError::OutOfStock {
                    name: product.name().to_string(),
                    requested: quantity,
                    available: product.units_in_stock(),
                };
                console.say(&err.to_string())?;
                console.say("Please enter a valid value:")?;
            }
            Err(_) => {
                console.say("Please enter a positive whole number.")?;
            }
        }
        attempts.record_failure()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use orderdesk_core::Money;
    use orderdesk_customers::Customer;
    use rust_decimal::Decimal;

    use crate::console::ScriptedConsole;
    use crate::error::SessionError;

    fn directory() -> CustomerDirectory {
        CustomerDirectory::from_customers(vec![
            Customer::new(CustomerId::new(1), "Smith", "Bob", "123 Street", "12345", "012").unwrap(),
        ])
        .unwrap()
    }

    fn hammer() -> Product {
        Product::new(
            Upc::new("123"),
            "16 oz. hickory hammer",
            "Stanley Tools",
            "1",
            Money::new(Decimal::from_str("9.97").unwrap()).unwrap(),
            50,
        )
        .unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_products(vec![hammer()]).unwrap()
    }

    #[test]
    fn unknown_customer_ids_re_prompt_until_a_match() {
        let mut console = ScriptedConsole::new(["7", "x", "1"]);
        let id = select_customer(&directory(), &mut console, RetryLimit::Unbounded).unwrap();
        assert_eq!(id, CustomerId::new(1));
        assert!(console.wrote("No customer with ID 7"));
        assert!(console.wrote("Please enter a numeric customer ID"));
        assert!(console.wrote("Welcome, Bob Smith"));
    }

    #[test]
    fn customer_listing_is_printed_before_the_prompt() {
        let mut console = ScriptedConsole::new(["1"]);
        select_customer(&directory(), &mut console, RetryLimit::Unbounded).unwrap();
        assert!(console.wrote("Smith, Bob"));
    }

    #[test]
    fn unknown_upcs_re_prompt_until_a_match() {
        let mut console = ScriptedConsole::new(["999", "123"]);
        let upc = select_product(&catalog(), &mut console, RetryLimit::Unbounded).unwrap();
        assert_eq!(upc, Upc::new("123"));
        assert!(console.wrote("No product with UPC 999"));
    }

    #[test]
    fn over_stock_quantity_is_rejected_naming_the_product() {
        let mut console = ScriptedConsole::new(["60", "2"]);
        let qty = select_quantity(&hammer(), &mut console, RetryLimit::Unbounded).unwrap();
        assert_eq!(qty, 2);
        assert!(console.wrote("quantity of 60 not available for 16 oz. hickory hammer"));
        assert!(console.wrote("Please enter a valid value:"));
    }

    #[test]
    fn garbage_quantities_re_prompt() {
        let mut console = ScriptedConsole::new(["zero", "0", "3"]);
        let qty = select_quantity(&hammer(), &mut console, RetryLimit::Unbounded).unwrap();
        assert_eq!(qty, 3);
        assert!(console.wrote("Please enter a positive whole number."));
    }

    #[test]
    fn yes_no_re_prompts_on_unrecognized_tokens() {
        let mut console = ScriptedConsole::new(["maybe", "y"]);
        assert!(ask_yes_no(&mut console, RetryLimit::Unbounded, "Add product? (Y/N)").unwrap());
        assert!(console.wrote("Please enter a valid response!"));
    }

    #[test]
    fn bounded_retry_budget_ends_the_loop() {
        let mut console = ScriptedConsole::new(["a", "b", "c", "d"]);
        let err = ask_yes_no(&mut console, RetryLimit::Max(2), "Y/N?").unwrap_err();
        assert!(matches!(err, SessionError::RetriesExhausted { attempts: 2 }));
    }

    #[test]
    fn closed_input_is_fatal() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let err = select_customer(&directory(), &mut console, RetryLimit::Unbounded).unwrap_err();
        assert!(matches!(err, SessionError::InputClosed));
    }
}
