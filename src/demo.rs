//! Built-in sample content used when no file is given.

const SECTIONS: [(&str, &str); 8] = [
    ("Summary", "A one-screen overview of the machine: uptime, load, the last reboot and who is logged in right now. Scroll down or page the carousel to visit each section."),
    ("Health", "Temperatures, fan speeds and disk SMART status. Anything outside its normal range is listed first so it is hard to miss."),
    ("Monitor", "Rolling averages for CPU, memory and network throughput over the last minute, five minutes and fifteen minutes."),
    ("Contacts", "People responsible for this host, their escalation order and the hours they can be reached."),
    ("Interfaces", "Every network interface with its addresses, link speed, duplex setting and error counters since boot."),
    ("Software", "Installed packages that differ from the fleet baseline, pending security updates and services that failed to start."),
    ("Hardware", "Processor model, memory modules, storage controllers and attached peripherals as reported by the firmware."),
    ("Config", "Local overrides to the standard configuration, with the date each one was introduced and the ticket that requested it."),
];

const ALTERNATE: [(&str, &str); 4] = [
    ("Flopsy", "The first of the good little bunnies, who went down the lane to gather blackberries."),
    ("Mopsy", "The second, who stayed with her sisters and was home in time for bread and milk."),
    ("CottonTail", "The third, who also kept to the lane and never went near the garden gate."),
    ("Peter", "Who was very naughty, ran straight to the garden and squeezed under the gate."),
];

fn render(preamble: &str, sections: &[(&str, &str)], paragraphs: usize) -> String {
    let mut markup = String::new();
    markup.push_str(preamble);
    markup.push_str("\n\n");
    for (title, body) in sections {
        markup.push_str("# ");
        markup.push_str(title);
        markup.push('\n');
        for _ in 0..paragraphs {
            markup.push_str(body);
            markup.push_str("\n\n");
        }
    }
    markup
}

/// Host report with eight sections
pub fn sample_markup() -> String {
    render("Host report for build-07.", &SECTIONS, 3)
}

/// Short four-section story, shown after a content change
pub fn alternate_markup() -> String {
    render("The tale of four rabbits.", &ALTERNATE, 2)
}
