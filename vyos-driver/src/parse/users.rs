//! Login users from `show configuration commands`.
//!
//! ```text
//! set system login user alice authentication encrypted-password '$6$...'
//! set system login user alice authentication public-keys alice@example.com key 'AAAAB3Nz...'
//! set system login user alice authentication public-keys alice@example.com type 'ssh-rsa'
//! set system login user alice level 'admin'
//! ```

use log::trace;

use crate::error::{ParseError, Result};
use crate::model::{User, Users};

/// Privilege level reported for `admin` users.
pub const ADMIN_LEVEL: u8 = 15;

/// Privilege level reported for every other user.
pub const DEFAULT_LEVEL: u8 = 0;

const USERNAME: usize = 4;

fn unquote(value: &str) -> &str {
    value.trim_matches('\'')
}

/// Accumulates the settings of one user across its configuration lines.
///
/// Password and level are mandatory; when a line repeats, the last one wins.
#[derive(Debug, Default)]
struct UserBuilder {
    level: Option<u8>,
    password: Option<String>,
    sshkeys: Vec<String>,
}

impl UserBuilder {
    fn apply(mut self, tokens: &[&str]) -> Self {
        match tokens {
            [_, _, _, _, _, "authentication", "encrypted-password", password, ..] => {
                self.password = Some(unquote(password).to_string());
            }
            [_, _, _, _, _, "level", level, ..] => {
                self.level = Some(if unquote(level) == "admin" {
                    ADMIN_LEVEL
                } else {
                    DEFAULT_LEVEL
                });
            }
            [_, _, _, _, _, _, _, _, "key", key] => {
                self.sshkeys.push(unquote(key).to_string());
            }
            _ => trace!("ignoring login line {:?}", tokens),
        }
        self
    }

    fn build(self, username: &str) -> Result<User> {
        let incomplete = |missing| ParseError::IncompleteUser {
            username: username.to_string(),
            missing,
        };

        Ok(User {
            level: self.level.ok_or_else(|| incomplete("level"))?,
            password: self.password.ok_or_else(|| incomplete("encrypted-password"))?,
            sshkeys: self.sshkeys,
        })
    }
}

/// Build one record per user defined under `system login user`.
///
/// Users appear in the order of their first line; each user's lines are
/// folded independently, so their relative order does not matter.
pub fn parse_users(text: &str) -> Result<Users> {
    let login_lines: Vec<Vec<&str>> = text
        .lines()
        .filter(|line| line.contains("login"))
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| {
            tokens.len() > USERNAME && tokens[2] == "login" && tokens[3] == "user"
        })
        .collect();

    let mut usernames: Vec<&str> = Vec::new();
    for tokens in &login_lines {
        if !usernames.contains(&tokens[USERNAME]) {
            usernames.push(tokens[USERNAME]);
        }
    }

    usernames
        .into_iter()
        .map(|username| {
            let user = login_lines
                .iter()
                .filter(|tokens| tokens[USERNAME] == username)
                .fold(UserBuilder::default(), |builder, tokens| builder.apply(tokens))
                .build(username)?;
            Ok((username.to_string(), user))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: [&str; 4] = [
        "set system login user alice authentication encrypted-password 'X'",
        "set system login user alice authentication public-keys alice@example.com key 'AAAAB3NzaC1yc2E'",
        "set system login user alice authentication public-keys alice@example.com type 'ssh-rsa'",
        "set system login user alice level 'admin'",
    ];

    #[test]
    fn test_admin_user() {
        let users = parse_users(&ALICE.join("\n")).unwrap();
        let alice = &users["alice"];
        assert_eq!(alice.level, 15);
        assert_eq!(alice.password, "X");
        assert_eq!(alice.sshkeys, vec!["AAAAB3NzaC1yc2E"]);
    }

    #[test]
    fn test_line_order_does_not_matter() {
        let mut lines = ALICE.to_vec();
        lines.reverse();
        let reversed = parse_users(&lines.join("\n")).unwrap();
        assert_eq!(reversed, parse_users(&ALICE.join("\n")).unwrap());
    }

    #[test]
    fn test_multiple_users() {
        let text = "\
set interfaces ethernet eth0 address '192.168.1.1/24'
set system login user bob level 'operator'
set system login user alice level 'admin'
set system login user bob authentication encrypted-password 'Y'
set system login user alice authentication encrypted-password 'X'
set system host-name 'vyos'
";
        let users = parse_users(text).unwrap();
        let names: Vec<&str> = users.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        assert_eq!(users["bob"].level, 0);
        assert_eq!(users["bob"].password, "Y");
        assert!(users["bob"].sshkeys.is_empty());
    }

    #[test]
    fn test_last_setting_wins() {
        let text = "\
set system login user carol level 'admin'
set system login user carol authentication encrypted-password 'old'
set system login user carol authentication encrypted-password 'new'
set system login user carol level 'operator'
";
        let users = parse_users(text).unwrap();
        assert_eq!(users["carol"].password, "new");
        assert_eq!(users["carol"].level, 0);
    }

    #[test]
    fn test_missing_password() {
        let text = "set system login user dave level 'admin'\n";
        match parse_users(text) {
            Err(crate::Error::Parse(ParseError::IncompleteUser { username, missing })) => {
                assert_eq!(username, "dave");
                assert_eq!(missing, "encrypted-password");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_level() {
        let text = "set system login user erin authentication encrypted-password 'Z'\n";
        assert!(matches!(
            parse_users(text),
            Err(crate::Error::Parse(ParseError::IncompleteUser { missing: "level", .. }))
        ));
    }

    #[test]
    fn test_no_users() {
        assert!(parse_users("set system host-name 'vyos'\n").unwrap().is_empty());
    }
}
