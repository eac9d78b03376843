use serde_json::json;

use crate::access::Role;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let roles: Vec<_> = Role::ALL
                .iter()
                .map(|role| {
                    json!({
                        "role": role,
                        "level": role.level(),
                        "staff": role.is_staff(),
                    })
                })
                .collect();
            output_success(output_format, "Role hierarchy", Some(json!({ "roles": roles })))
        }
        OutputFormat::Text => {
            println!("Role hierarchy (highest first):");
            for role in Role::ALL {
                let tier = if role.is_staff() { "staff" } else { "subscriber-gated" };
                println!("  {}  {:<14} {}", role.level(), role.as_str(), tier);
            }
            Ok(())
        }
    }
}
