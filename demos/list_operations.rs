//! Print the operation table with each operation's wire-level query keys.
//!
//! Run:
//! `cargo run --example list_operations`

use ss12000_client::operations;

fn main() {
    for operation in operations() {
        let keys: Vec<&str> = operation.params().map(|param| param.wire).collect();
        println!(
            "{:<6} {:<32} {:<28} {}",
            operation.method.as_str(),
            operation.path_template,
            operation.operation_id,
            keys.join(",")
        );
    }
}
