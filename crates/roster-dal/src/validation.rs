//! Field rules shared by create and update payloads.
//!
//! Rules take the bare value and are attached to `Option` fields with
//! `inner(custom(..))`, so an absent value is never checked here
//! (presence is enforced separately with `required`).

pub const MAX_NAME_LENGTH: usize = 12;
pub const MAX_TITLE_LENGTH: usize = 30;
pub const MAX_EXPERIENCE: i32 = 10_000_000;
pub const MIN_BIRTHDAY: i64 = 946_674_000_482;
pub const MAX_BIRTHDAY: i64 = 32_535_205_199_494;

pub fn valid_name(name: &str, _ctx: &()) -> garde::Result {
    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        Err(garde::Error::new(
            "must be non-empty and at most 12 characters",
        ))
    } else {
        Ok(())
    }
}

pub fn valid_title(title: &str, _ctx: &()) -> garde::Result {
    if title.chars().count() > MAX_TITLE_LENGTH {
        Err(garde::Error::new("must be at most 30 characters"))
    } else {
        Ok(())
    }
}

pub fn valid_experience(experience: &i32, _ctx: &()) -> garde::Result {
    if (0..=MAX_EXPERIENCE).contains(experience) {
        Ok(())
    } else {
        Err(garde::Error::new("must be between 0 and 10000000"))
    }
}

/// Birthday is epoch milliseconds
pub fn valid_birthday(birthday: &i64, _ctx: &()) -> garde::Result {
    if (MIN_BIRTHDAY..=MAX_BIRTHDAY).contains(birthday) {
        Ok(())
    } else {
        Err(garde::Error::new("must be between years 2000 and 3000"))
    }
}
