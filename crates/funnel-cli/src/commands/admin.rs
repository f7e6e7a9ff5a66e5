//! Handlers for the admin control panel: companies, feature flags, user
//! groups, and users.

use anyhow::Result;
use clap::Subcommand;

use funnel_core::{company::NewCompany, user::UserRole};
use funnel_registry::{Registry, query::CompanyFilter};

use crate::render;

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
  /// Quick stats: companies, seats, feature catalog size.
  Summary,

  /// List companies.
  Companies {
    /// Free-text search over the company name.
    #[arg(short, long)]
    query: Option<String>,
  },

  /// Manage one company.
  Company {
    #[command(subcommand)]
    command: CompanyCommand,
  },

  /// List the feature catalog with enabled-company counts.
  Features,

  /// Edit a catalog feature.
  Feature {
    #[command(subcommand)]
    command: FeatureCommand,
  },

  /// List user groups and their permissions.
  Groups,

  /// Manage one user group.
  Group {
    #[command(subcommand)]
    command: GroupCommand,
  },

  /// List users.
  Users,

  /// Edit a user.
  User {
    #[command(subcommand)]
    command: UserCommand,
  },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
  /// Create a company.
  Add {
    #[arg(long)]
    name: String,

    /// Seed the manager whitelist with one address.
    #[arg(long)]
    manager_email: Option<String>,
  },

  /// Edit the name or manager whitelist (whole-record save).
  Edit {
    id: String,

    #[arg(long)]
    name: Option<String>,

    /// Whitelist an address; repeat to add several.
    #[arg(long = "add-email")]
    add_emails: Vec<String>,

    /// Remove an address from the whitelist.
    #[arg(long = "remove-email")]
    remove_emails: Vec<String>,
  },

  /// Delete a company. Its users are left untouched.
  Delete { id: String },

  /// Toggle a feature flag on or off.
  Toggle { id: String, feature: String },
}

#[derive(Subcommand, Debug)]
pub enum FeatureCommand {
  /// Edit a feature's name or description.
  Edit {
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,
  },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
  /// Edit a group's name or description.
  Edit {
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,
  },

  /// Grant or revoke a permission.
  Toggle { id: String, permission: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
  /// Edit a user's details.
  Edit {
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// One of: sdr, sales_rep, manager, sysadmin.
    #[arg(long)]
    role: Option<UserRole>,

    #[arg(long)]
    company: Option<String>,
  },
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub fn run(
  registry: &mut Registry,
  command: AdminCommand,
  json: bool,
) -> Result<()> {
  match command {
    AdminCommand::Summary => {
      let summary = registry.admin_summary();
      if json {
        return render::json(&summary);
      }
      println!("Companies: {}", summary.total_companies);
      println!("Users:     {}", summary.total_users);
      println!("Features:  {}", summary.total_features);
    }

    AdminCommand::Companies { query } => {
      let companies = registry.companies(&CompanyFilter { text: query });
      if json {
        return render::json(&companies);
      }
      if companies.is_empty() {
        println!("No companies found matching your search criteria.");
      }
      for company in companies {
        println!(
          "[{}] {} ({} users, {} features enabled)",
          company.id,
          company.name,
          company.user_count,
          company.features.len()
        );
        if !company.manager_emails.is_empty() {
          println!("     managers: {}", company.manager_emails.join(", "));
        }
        // Resolve feature names from the catalog for display.
        let names: Vec<String> = company
          .features
          .iter()
          .map(|id| {
            registry
              .feature(id)
              .map(|f| f.name)
              .unwrap_or_else(|_| id.to_string())
          })
          .collect();
        if !names.is_empty() {
          println!("     features: {}", names.join(", "));
        }
      }
    }

    AdminCommand::Company { command } => {
      run_company(registry, command, json)?;
    }

    AdminCommand::Features => {
      let features = registry.features();
      if json {
        return render::json(&features);
      }
      for feature in features {
        println!(
          "[{}] {} ({} companies)",
          feature.id,
          feature.name,
          registry.feature_company_count(&feature.id)
        );
        println!("     {}", feature.description);
      }
    }

    AdminCommand::Feature {
      command: FeatureCommand::Edit { id, name, description },
    } => {
      let mut feature = registry.feature(&id.into())?;
      if let Some(name) = name {
        feature.name = name;
      }
      if let Some(description) = description {
        feature.description = description;
      }
      let saved = registry.save_feature(feature)?;
      if json {
        return render::json(&saved);
      }
    }

    AdminCommand::Groups => {
      let groups = registry.groups();
      if json {
        return render::json(&groups);
      }
      let catalog = registry.permissions();
      for group in groups {
        println!(
          "[{}] {} ({} members)",
          group.id, group.name, group.member_count
        );
        println!("     {}", group.description);
        let labels: Vec<String> = group
          .permissions
          .iter()
          .map(|id| {
            catalog
              .iter()
              .find(|p| p.id == *id)
              .map(|p| p.label.clone())
              .unwrap_or_else(|| id.to_string())
          })
          .collect();
        if !labels.is_empty() {
          println!("     permissions: {}", labels.join(", "));
        }
      }
    }

    AdminCommand::Group { command } => match command {
      GroupCommand::Edit { id, name, description } => {
        let mut group = registry.group(&id.into())?;
        if let Some(name) = name {
          group.name = name;
        }
        if let Some(description) = description {
          group.description = description;
        }
        let saved = registry.save_group(group)?;
        if json {
          return render::json(&saved);
        }
      }
      GroupCommand::Toggle { id, permission } => {
        let saved =
          registry.toggle_group_permission(&id.into(), &permission.into())?;
        if json {
          return render::json(&saved);
        }
      }
    },

    AdminCommand::Users => {
      let users = registry.users();
      if json {
        return render::json(&users);
      }
      for user in users {
        let company = user.company.as_deref().unwrap_or("-");
        println!(
          "[{}] {} <{}> {} ({})",
          user.id,
          user.name,
          user.email,
          user.role.label(),
          company
        );
      }
    }

    AdminCommand::User {
      command: UserCommand::Edit { id, name, email, role, company },
    } => {
      let mut user = registry.user(&id.into())?;
      if let Some(name) = name {
        user.name = name;
      }
      if let Some(email) = email {
        user.email = email;
      }
      if let Some(role) = role {
        user.role = role;
      }
      if let Some(company) = company {
        user.company = Some(company);
      }
      let saved = registry.save_user(user)?;
      if json {
        return render::json(&saved);
      }
    }
  }
  Ok(())
}

fn run_company(
  registry: &mut Registry,
  command: CompanyCommand,
  json: bool,
) -> Result<()> {
  match command {
    CompanyCommand::Add { name, manager_email } => {
      let company =
        registry.add_company(NewCompany { name, manager_email })?;
      if json {
        return render::json(&company);
      }
    }

    CompanyCommand::Edit { id, name, add_emails, remove_emails } => {
      let mut company = registry.company(&id.into())?;
      if let Some(name) = name {
        company.name = name;
      }
      company.manager_emails.extend(add_emails);
      company
        .manager_emails
        .retain(|email| !remove_emails.contains(email));
      // The save dedupes the whitelist.
      let saved = registry.save_company(company)?;
      if json {
        return render::json(&saved);
      }
    }

    CompanyCommand::Delete { id } => {
      let removed = registry.delete_company(&id.into())?;
      if json {
        return render::json(&removed);
      }
    }

    CompanyCommand::Toggle { id, feature } => {
      let saved =
        registry.toggle_company_feature(&id.into(), &feature.into())?;
      if json {
        return render::json(&saved);
      }
    }
  }
  Ok(())
}
