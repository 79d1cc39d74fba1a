use formwork::form::{FieldLens, FormModel};

#[derive(Clone, formwork::form::FormModel)]
struct DemoForm {
    email: String,
}

fn main() {
    let fields = DemoForm::fields();
    let lens = fields.email();
    let mut model = DemoForm {
        email: "a@formwork.dev".to_string(),
    };
    lens.set(&mut model, "b@formwork.dev".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.get(&model), "b@formwork.dev");
    assert_eq!(model.field_keys(), vec![formwork::form::FieldKey::new("email")]);
}
