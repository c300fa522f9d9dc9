//! Given steps for account deletion BDD scenarios.

use super::world::{AccountWorld, build_request, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a registered user "{email}""#)]
fn a_registered_user(world: &mut AccountWorld, email: String) -> Result<(), eyre::Report> {
    let user = run_async(world.users.register(build_request(&email)))
        .wrap_err("register user for scenario")?;
    world.registered.insert(email, user);
    Ok(())
}

#[given(r#""{email}" has sent {count:usize} messages"#)]
fn user_has_sent_messages(
    world: &mut AccountWorld,
    email: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let sender = world.user(&email)?.id();
    for index in 1..=count {
        run_async(world.messages.send(sender, format!("message {index}")))
            .wrap_err("send message for scenario")?;
    }
    Ok(())
}

#[given(r#"a conversation between "{first}" and "{second}""#)]
fn a_conversation_between(
    world: &mut AccountWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let members = [world.user(&first)?.id(), world.user(&second)?.id()];
    let started =
        run_async(world.conversations.start(members)).wrap_err("start conversation")?;
    world.conversation = Some(started.conversation().id());
    Ok(())
}
