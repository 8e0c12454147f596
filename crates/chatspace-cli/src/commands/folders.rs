use super::Context;

pub fn list(context: &Context) {
    if context.catalog.is_empty() {
        println!("No folders in catalog");
        return;
    }
    for folder in context.catalog.ordered_folders() {
        println!("{:>6}  {}", folder.id, folder.title);
    }
}
