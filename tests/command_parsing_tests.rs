#![allow(clippy::unwrap_used, clippy::panic)]

use marketing_bot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[test]
fn test_start_command_parsing() {
    let result = Command::parse("/start", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Start));
}

#[test]
fn test_help_command_parsing() {
    let result = Command::parse("/help", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Help));
}

#[test]
fn test_add_chat_command_parsing() {
    let result = Command::parse("/add_chat", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::AddChat));
}

#[test]
fn test_list_chats_command_parsing() {
    let result = Command::parse("/list_chats", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::ListChats));
}

#[test]
fn test_add_template_captures_the_full_argument_line() {
    let input = "/add_template promo <b>Sale!</b> | Shop now | https://example.com";
    match Command::parse(input, "testbot").unwrap() {
        Command::AddTemplate(args) => {
            assert_eq!(args, "promo <b>Sale!</b> | Shop now | https://example.com");
        }
        _ => panic!("Expected AddTemplate command"),
    }
}

#[test]
fn test_delete_template_command_parsing() {
    match Command::parse("/delete_template promo", "testbot").unwrap() {
        Command::DeleteTemplate(name) => assert_eq!(name, "promo"),
        _ => panic!("Expected DeleteTemplate command"),
    }
}

#[test]
fn test_broadcast_keeps_message_spacing() {
    match Command::parse("/broadcast Big news:  50% off!", "testbot").unwrap() {
        Command::Broadcast(message) => assert_eq!(message, "Big news:  50% off!"),
        _ => panic!("Expected Broadcast command"),
    }
}

#[test]
fn test_schedule_command_captures_arguments() {
    match Command::parse("/schedule 1h30m all Launch in ninety minutes", "testbot").unwrap() {
        Command::Schedule(args) => assert_eq!(args, "1h30m all Launch in ninety minutes"),
        _ => panic!("Expected Schedule command"),
    }
}

#[test]
fn test_send_command_parsing() {
    let result = Command::parse("/send", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Send));
}

#[test]
fn test_stats_command_parsing() {
    let result = Command::parse("/stats", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Stats));
}

#[test]
fn test_cancel_command_parsing() {
    let result = Command::parse("/cancel", "testbot");
    assert!(result.is_ok());
    assert!(matches!(result.unwrap(), Command::Cancel));
}

#[test]
fn test_add_keyword_command_parsing() {
    match Command::parse("/add_keyword price See our pricing page", "testbot").unwrap() {
        Command::AddKeyword(args) => assert_eq!(args, "price See our pricing page"),
        _ => panic!("Expected AddKeyword command"),
    }
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Command::parse("/frobnicate", "testbot").is_err());
}
