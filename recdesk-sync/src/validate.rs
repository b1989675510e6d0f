//! Input validation — the gate between a form and the network.
//!
//! Pure functions: outcome depends only on the candidate fields. Lengths are
//! counted in characters, not bytes, so non-ASCII names validate the same
//! way they read.

use recdesk_types::{CategoryPatch, Draft, NewCategory, NewRecord, NewUser, Patch, RecordPatch, UserPatch};

/// Accept or reject a draft. The reason is caller-facing text.
pub fn validate_draft(draft: &Draft) -> Result<(), String> {
    match draft {
        Draft::User(u) => validate_user(u),
        Draft::Category(c) => validate_category(c),
        Draft::Record(r) => validate_record(r),
    }
}

/// Accept or reject a patch. Only supplied fields are checked; an absent
/// field means "leave unchanged" and is never a rejection.
pub fn validate_patch(patch: &Patch) -> Result<(), String> {
    match patch {
        Patch::User(p) => validate_user_patch(p),
        Patch::Category(p) => validate_category_patch(p),
        Patch::Record(p) => validate_record_patch(p),
    }
}

fn validate_user(user: &NewUser) -> Result<(), String> {
    check_name(&user.name)?;
    check_email(&user.email)
}

fn validate_category(category: &NewCategory) -> Result<(), String> {
    check_category_name(&category.name)
}

fn validate_record(record: &NewRecord) -> Result<(), String> {
    check_title(&record.title)?;
    check_content(&record.content)
}

fn validate_user_patch(patch: &UserPatch) -> Result<(), String> {
    if let Some(name) = &patch.name {
        check_name(name)?;
    }
    if let Some(email) = &patch.email {
        check_email(email)?;
    }
    Ok(())
}

fn validate_category_patch(patch: &CategoryPatch) -> Result<(), String> {
    if let Some(name) = &patch.name {
        check_category_name(name)?;
    }
    Ok(())
}

fn validate_record_patch(patch: &RecordPatch) -> Result<(), String> {
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if let Some(content) = &patch.content {
        check_content(content)?;
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), String> {
    if name.chars().count() < 2 {
        return Err("name must be at least 2 characters".to_string());
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), String> {
    if !email.contains('@') {
        return Err("email address is not valid".to_string());
    }
    Ok(())
}

fn check_category_name(name: &str) -> Result<(), String> {
    if name.chars().count() < 3 {
        return Err("category name must be at least 3 characters".to_string());
    }
    Ok(())
}

fn check_title(title: &str) -> Result<(), String> {
    if title.chars().count() < 3 {
        return Err("title must be at least 3 characters".to_string());
    }
    Ok(())
}

fn check_content(content: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("content must not be empty".to_string());
    }
    Ok(())
}
