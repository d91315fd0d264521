use crate::commands::Session;
use crate::error::{Result, UsersError};
use crate::output::{self, dim, heading};
use crate::types::{Company, User};

/// Look a user up in the local store, loading it first if it never was.
pub async fn show(session: &mut Session, id: u64) -> Result<()> {
    session.ensure_loaded().await?;
    let user = session.store.get(id).ok_or(UsersError::UserNotFound(id))?;
    output::print_item(user, |u| println!("{}", render(u)));
    Ok(())
}

fn render(user: &User) -> String {
    let fields = &user.fields;
    let mut out = format!("{} {}\n\n", heading(&fields.name), dim(&format!("#{}", user.id)));

    out.push_str(&heading("Contact Information"));
    out.push('\n');
    out.push_str(&format!("Email:    {}\n", fields.email));
    if let Some(phone) = &fields.phone {
        out.push_str(&format!("Phone:    {phone}\n"));
    }
    if let Some(website) = &fields.website {
        out.push_str(&format!("Website:  {website}\n"));
    }

    let (first, second) = fields.address.lines();
    out.push('\n');
    out.push_str(&heading("Address"));
    out.push_str(&format!("\n{first}\n{second}"));

    if let Some(company) = &fields.company {
        out.push_str("\n\n");
        out.push_str(&render_company(company));
    }

    out.trim_end().to_string()
}

fn render_company(company: &Company) -> String {
    let mut out = format!("{}\n{}\n", heading("Company"), company.name);
    if !company.catch_phrase.is_empty() {
        out.push_str(&format!("\"{}\"\n", company.catch_phrase));
    }
    out.push_str(&company.bs);
    out
}
