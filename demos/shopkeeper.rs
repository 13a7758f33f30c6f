use std::{io, process::exit};

use parley::*;

fn main() {
    let graphs = build_shop();
    let session = DialogueSession::new(graphs, Location::new("shop", "ask_for_name"))
        .expect("the entry node is registered");

    match play(session) {
        Ok(_) => println!("FIN\n"),
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        }
    }
}

fn play(mut session: DialogueSession) -> Result<(), RuntimeError> {
    let mut line_buffer = Vec::new();

    session.start()?;

    loop {
        line_buffer.clear();

        let prompt = session.resume(&mut line_buffer)?;
        print_lines(&line_buffer);

        match prompt {
            Prompt::Choice(choices) => {
                let selection = ask_user_for_choice(&choices).unwrap_or_else(|| {
                    println!("Exiting.");
                    exit(0);
                });

                println!();
                session.make_choice(selection)?;
            }
            Prompt::Input(request) => {
                println!("({})", request.variable);
                let text = read_input_line();

                println!();
                session.supply_input(text.trim())?;
            }
            Prompt::Done { tag } => {
                if let Some(tag) = tag {
                    println!("-- ending: {} --", tag);
                }

                return Ok(());
            }
            Prompt::Handoff(handoff) => {
                println!("-- handing off to {} --", handoff.to);

                if handoff.locked {
                    return Ok(());
                }
            }
        }
    }
}

fn ask_user_for_choice(choices: &[Choice]) -> Option<usize> {
    println!("Choose:");

    for (i, choice) in choices.iter().enumerate() {
        println!("  {}. {}", i + 1, choice.text);
    }

    println!("     ---");
    println!("  0. Leave the conversation");
    println!();

    loop {
        let input = read_input_line();

        match input.trim().parse::<usize>() {
            Ok(0) => return None,
            Ok(i) if i <= choices.len() => return Some(i - 1),
            _ => println!("Not a valid option, try again:"),
        }
    }
}

fn read_input_line() -> String {
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input
}

fn print_lines(lines: &LineBuffer) {
    for line in lines {
        match line.mode {
            LineMode::Spoken => println!("\"{}\"", line.text),
            LineMode::Action => println!("{}", line.text),
        }
    }
}

fn build_shop() -> GraphSet {
    let shop = Graph::builder()
        .with_node(
            NodeBuilder::new("ask_for_name")
                .with_line(Line::spoken("Well now, a new face. What do they call you?"))
                .with_choice(ChoiceBuilder::jump("welcome").with_input("name").build())
                .build(),
        )
        .with_node(
            NodeBuilder::new("welcome")
                .with_line(Line::spoken("Well met, {name}."))
                .with_choice(ChoiceBuilder::jump("main").build())
                .build(),
        )
        .with_node(
            NodeBuilder::new("main")
                .with_line(Line::spoken("What can I do for you, {name}?"))
                .with_choice(
                    ChoiceBuilder::jump("looking_around")
                        .with_response(Line::spoken("I'm just looking around."))
                        .with_once("looked_around")
                        .build(),
                )
                .with_choice(
                    ChoiceBuilder::jump("long_enough")
                        .with_response(Line::spoken("I'm just looking around."))
                        .with_require("looked_around")
                        .build(),
                )
                .with_choice(
                    ChoiceBuilder::jump("work_to_do")
                        .with_response(Line::spoken("I have work to do."))
                        .with_once("work_to_do")
                        .build(),
                )
                .with_choice(
                    ChoiceBuilder::jump("death_talk")
                        .with_response(Line::spoken("Have you faced death before?"))
                        .with_require("inquiry")
                        .with_require("spared!")
                        .build(),
                )
                .build(),
        )
        .with_node(
            NodeBuilder::new("looking_around")
                .with_line(Line::action("You wander between the cramped shelves."))
                .with_choice(ChoiceBuilder::jump("main").build())
                .build(),
        )
        .with_node(
            NodeBuilder::new("long_enough")
                .with_line(Line::spoken("Looked around long enough, have you?"))
                .with_choice(ChoiceBuilder::jump("main").build())
                .build(),
        )
        .with_node(
            NodeBuilder::new("work_to_do")
                .with_line(Line::spoken("Then you'd best get to it."))
                .with_choice(
                    ChoiceBuilder::jump("main")
                        .with_response(Line::spoken("No, wait! I need to ask you something!"))
                        .with_apply("inquiry")
                        .build(),
                )
                .with_choice(
                    ChoiceBuilder::ending(vec![Line::spoken(
                        "Come back when your pockets are heavier.",
                    )])
                    .with_response(Line::spoken("Then I'll be on my way."))
                    .with_tag("LEFT")
                    .build(),
                )
                .build(),
        )
        .with_node(
            NodeBuilder::new("death_talk")
                .with_line(Line::spoken("Death and I are old acquaintances."))
                .with_choice(
                    ChoiceBuilder::jump("combat/first_blood")
                        .with_response(Line::spoken("Draw your blade."))
                        .with_tag("FIGHT")
                        .is_locking()
                        .build(),
                )
                .with_choice(
                    ChoiceBuilder::ending(vec![Line::action(
                        "The shopkeeper bows, just slightly.",
                    )])
                    .with_response(Line::spoken("Today you are spared."))
                    .with_tag("SPARED")
                    .with_apply("spared")
                    .build(),
                )
                .with_choice(
                    ChoiceBuilder::jump("main")
                        .with_response(Line::spoken("Forget I asked."))
                        .build(),
                )
                .build(),
        )
        .build()
        .expect("the shop graph has no duplicate nodes");

    let mut graphs = GraphSet::new();
    graphs.register("shop", shop);
    graphs.register_external("combat");

    graphs.validate().expect("the shop graph is consistent");

    graphs
}
