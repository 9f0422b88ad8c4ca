//! Interactive text menu.

use std::io::{self, BufRead, Write};

use storefront_core::Entity;
use storefront_products::{ProductRef, Purchasable};
use storefront_store::{OrderLine, Store};

const MENU: &str = "\
1. List all products in store
2. Show total amount in store
3. Make an order
4. Quit";

/// Menu loop over any line-oriented input and output.
pub struct Shell<R, W> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice (1-4): ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.list_products()?,
                "2" => self.show_total()?,
                "3" => self.make_order()?,
                "4" => {
                    writeln!(self.output, "Thank you for visiting! Goodbye")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please try again")?,
            }
        }
    }

    fn list_products(&mut self) -> io::Result<()> {
        for product in self.store.all_products() {
            writeln!(self.output, "{}", product.borrow().render())?;
        }
        Ok(())
    }

    fn show_total(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Total quantity in store: {} Items",
            self.store.total_quantity()
        )
    }

    fn make_order(&mut self) -> io::Result<()> {
        let products: Vec<ProductRef> = self.store.all_products().to_vec();
        for (i, product) in products.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, product.borrow().render())?;
        }

        let mut lines = Vec::new();
        while let Some(choice) =
            self.prompt("Choose a product by number (or type 'done' to finish): ")?
        {
            if choice.eq_ignore_ascii_case("done") {
                break;
            }
            let product = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| products.get(i));
            let Some(product) = product else {
                writeln!(self.output, "invalid choice. Please try again")?;
                continue;
            };
            let Some(quantity) = self.prompt("Enter quantity: ")? else {
                break;
            };
            match quantity.parse::<i64>() {
                Ok(quantity) => {
                    tracing::debug!(product_id = %product.borrow().id(), quantity, "line added");
                    lines.push(OrderLine::new(product, quantity));
                }
                Err(_) => writeln!(self.output, "invalid choice. Please try again")?,
            }
        }

        match self.store.order(&lines) {
            Ok(total) => {
                tracing::info!(lines = lines.len(), total, "order placed");
                writeln!(self.output, "Total order cost: ${total:.2}")
            }
            Err(err) => {
                tracing::warn!(error = %err, lines = lines.len(), "order failed");
                writeln!(self.output, "Order failed: {err}")?;
                writeln!(
                    self.output,
                    "Items listed before the failing one remain purchased."
                )
            }
        }
    }

    /// Print `text`, then read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::rc::Rc;
    use storefront_products::Product;

    fn run(store: Store, input: &str) -> (Store, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(store, Cursor::new(input.as_bytes()), &mut output);
        shell.run().unwrap();
        let store = shell.store().clone();
        (store, String::from_utf8(output).unwrap())
    }

    fn widget_store() -> (Store, ProductRef) {
        let widget = Product::new("Widget", 10.0, 5).unwrap().into_shared();
        (Store::new(vec![Rc::clone(&widget)]), widget)
    }

    #[test]
    fn lists_products_and_quits() {
        let (store, _) = widget_store();
        let (_, out) = run(store, "1\n4\n");
        assert!(out.contains("Widget, Price: $10, Quantity: 5\n"));
        assert!(out.ends_with("Thank you for visiting! Goodbye\n"));
    }

    #[test]
    fn shows_total_quantity() {
        let (store, _) = widget_store();
        let (_, out) = run(store, "2\n4\n");
        assert!(out.contains("Total quantity in store: 5 Items"));
    }

    #[test]
    fn rejects_unknown_menu_choice() {
        let (store, _) = widget_store();
        let (_, out) = run(store, "9\n4\n");
        assert!(out.contains("Invalid choice. Please try again"));
    }

    #[test]
    fn order_debits_shared_product() {
        let (store, widget) = widget_store();
        let (store, out) = run(store, "3\n1\n5\ndone\n4\n");
        assert!(out.contains("1. Widget, Price: $10, Quantity: 5"));
        assert!(out.contains("Total order cost: $50.00"));
        assert_eq!(widget.borrow().quantity(), 0);
        assert!(!widget.borrow().is_active());
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn order_skips_invalid_selections() {
        let (store, widget) = widget_store();
        let (_, out) = run(store, "3\n7\nabc\n1\nmany\n1\n2\nDONE\n4\n");
        assert_eq!(out.matches("invalid choice. Please try again").count(), 3);
        assert!(out.contains("Total order cost: $20.00"));
        assert_eq!(widget.borrow().quantity(), 3);
    }

    #[test]
    fn failed_order_reports_error_and_partial_debit() {
        let widget = Product::new("Widget", 10.0, 5).unwrap().into_shared();
        let gadget = Product::new("Gadget", 20.0, 1).unwrap().into_shared();
        let store = Store::new(vec![Rc::clone(&widget), Rc::clone(&gadget)]);

        let (_, out) = run(store, "3\n1\n2\n2\n3\ndone\n4\n");

        assert!(out.contains("Order failed: Not enough stock. Only 1 units available"));
        assert!(out.contains("remain purchased"));
        assert_eq!(widget.borrow().quantity(), 3);
        assert_eq!(gadget.borrow().quantity(), 1);
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let (store, widget) = widget_store();
        let (_, out) = run(store, "3\n1\n");
        assert!(out.contains("Total order cost: $0.00"));
        assert_eq!(widget.borrow().quantity(), 5);
    }
}
