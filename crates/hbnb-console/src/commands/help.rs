//! `help [<topic>]`

use super::Outcome;

/// Command names and their help text, in listing order
const TOPICS: [(&str, &str); 9] = [
    ("EOF", "Exit the interpreter at end of input."),
    (
        "all",
        "Print every instance, or every instance of a class.\n\
         Usage: all [<class>] | <class>.all()",
    ),
    (
        "count",
        "Print the number of instances of a class.\n\
         Usage: count <class> | <class>.count()",
    ),
    (
        "create",
        "Create an instance, save it and print its id.\n\
         Usage: create <class> [<key>=<value> ...]",
    ),
    (
        "destroy",
        "Delete an instance by class and id.\n\
         Usage: destroy <class> <id> | <class>.destroy(<id>)",
    ),
    (
        "help",
        "List available commands with \"help\" or detailed help with \"help cmd\".",
    ),
    ("quit", "Quit command to exit the program."),
    (
        "show",
        "Print an instance by class and id.\n\
         Usage: show <class> <id> | <class>.show(<id>)",
    ),
    (
        "update",
        "Set attributes on an instance and save it.\n\
         Usage: update <class> <id> <attribute> <value>\n\
         \x20      <class>.update(<id>, <attribute>, <value>)\n\
         \x20      <class>.update(<id>, {<attribute>: <value>, ...})",
    ),
];

pub fn execute(topic: Option<&str>) -> Outcome {
    let Some(topic) = topic else {
        let names: Vec<&str> = TOPICS.iter().map(|(name, _)| *name).collect();
        return Outcome::Lines(vec![
            String::new(),
            "Documented commands (type help <topic>):".to_string(),
            "========================================".to_string(),
            names.join("  "),
            String::new(),
        ]);
    };

    match TOPICS.iter().find(|(name, _)| *name == topic) {
        Some((_, text)) => Outcome::Lines(text.lines().map(str::to_string).collect()),
        None => Outcome::Lines(vec![format!("*** No help on {}", topic)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_command() {
        let Outcome::Lines(lines) = execute(None) else {
            panic!("expected lines");
        };
        assert_eq!(lines[3], "EOF  all  count  create  destroy  help  quit  show  update");
    }

    #[test]
    fn test_unknown_topic() {
        assert_eq!(
            execute(Some("fly")),
            Outcome::Lines(vec!["*** No help on fly".to_string()])
        );
    }

    #[test]
    fn test_update_topic_mentions_mapping_form() {
        let Outcome::Lines(lines) = execute(Some("update")) else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("{<attribute>: <value>, ...}"));
    }
}
