use crate::cli::{AddArgs, EditArgs, ExtraArgs};
use crate::commands::Session;
use crate::error::{Result, UsersError};
use crate::output;
use crate::types::{Address, User, UserDraft};

pub async fn add(session: &mut Session, args: AddArgs) -> Result<()> {
    session.ensure_loaded().await?;
    let draft = draft_from_args(args)?;

    let created = session.store.create(&session.client, draft).await?.clone();
    session.commit()?;

    output::print_item(&created, |u| {
        output::print_message(&format!("Created user {} - {}", u.id, u.name()));
    });
    Ok(())
}

pub async fn edit(session: &mut Session, args: EditArgs) -> Result<()> {
    session.ensure_loaded().await?;
    let existing = session
        .store
        .get(args.id)
        .ok_or(UsersError::UserNotFound(args.id))?;
    let record = apply_edit(existing, args)?;

    if !session.store.update(&session.client, record.clone()).await? {
        return Err(UsersError::UserNotFound(record.id));
    }
    session.commit()?;

    output::print_item(&record, |u| {
        output::print_message(&format!("Updated user {} - {}", u.id, u.name()));
    });
    Ok(())
}

fn draft_from_args(args: AddArgs) -> Result<UserDraft> {
    let mut draft = UserDraft {
        name: args.name,
        email: args.email,
        address: Address {
            street: args.street,
            suite: args.suite,
            city: args.city,
            zipcode: args.zipcode,
        },
        ..UserDraft::default()
    };
    apply_extra(&mut draft, args.extra)?;
    Ok(draft)
}

/// Start from the stored record and overwrite only the fields that were given.
fn apply_edit(existing: &User, args: EditArgs) -> Result<User> {
    let mut fields = existing.fields.clone();

    if let Some(name) = args.name {
        fields.name = name;
    }
    if let Some(email) = args.email {
        fields.email = email;
    }
    if let Some(street) = args.street {
        fields.address.street = street;
    }
    if let Some(suite) = args.suite {
        fields.address.suite = suite;
    }
    if let Some(city) = args.city {
        fields.address.city = city;
    }
    if let Some(zipcode) = args.zipcode {
        fields.address.zipcode = zipcode;
    }
    apply_extra(&mut fields, args.extra)?;

    Ok(User::new(existing.id, fields))
}

fn apply_extra(draft: &mut UserDraft, extra: ExtraArgs) -> Result<()> {
    if let Some(phone) = extra.phone {
        draft.phone = non_empty(phone);
    }
    if let Some(website) = extra.website {
        draft.website = non_empty(website);
    }

    if extra.company.as_deref() == Some("") {
        draft.company = None;
        return Ok(());
    }
    if extra.company.is_none() && extra.catch_phrase.is_none() && extra.bs.is_none() {
        return Ok(());
    }

    let mut company = draft.company.take().unwrap_or_default();
    if let Some(name) = extra.company {
        company.name = name;
    }
    if let Some(catch_phrase) = extra.catch_phrase {
        company.catch_phrase = catch_phrase;
    }
    if let Some(bs) = extra.bs {
        company.bs = bs;
    }
    if company.name.trim().is_empty() {
        return Err(UsersError::InvalidUser {
            field: "company",
            reason: "a company name is required to set its catch phrase or bs".to_string(),
        });
    }
    draft.company = Some(company);
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
