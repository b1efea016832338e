//! Rating method listing command.

use rs_rating::registry::{MethodCategory, create_method, methods_by_category};

/// List the rating methods by category.
pub(crate) fn run(verbose: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Available Rating Methods                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for category in [MethodCategory::ReturnBased, MethodCategory::PriceRatio] {
        let methods = methods_by_category(&category);
        if methods.is_empty() {
            continue;
        }

        println!("{}:", category.description());
        println!("{}", "-".repeat(60));

        for info in methods {
            if verbose {
                let lookback = create_method(info.name)
                    .map(|m| m.lookback(info.default_interval))
                    .unwrap_or_default();
                println!("  {:12} - {}", info.name, info.description);
                println!(
                    "  {:12}   aliases: {}, interval: {}, lookback: {} bars",
                    "",
                    info.aliases.join(", "),
                    info.default_interval,
                    lookback
                );
            } else {
                println!("  {:12} ({})", info.name, info.aliases.join(", "));
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for method descriptions.\n");
    }
}
